//! Element ids, class names and style values shared with the page markup.
//!
//! Hosts bind these to real elements; the handlers only ever name them.

pub const CONTACT_FORM_ID: &str = "contactForm";
pub const FORM_MESSAGE_ID: &str = "formMessage";
pub const FULL_NAME_ID: &str = "fullName";
pub const EMAIL_ID: &str = "email";
pub const PHONE_ID: &str = "phone";
pub const NAVBAR_ID: &str = "navbar";
pub const NAV_TOGGLE_ID: &str = "navToggle";
pub const NAV_MENU_ID: &str = "navMenu";
/// Radio group carrying `invest` / `rent` / `design`.
pub const PURPOSE_GROUP: &str = "purpose";

pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";
pub const INPUT_FOCUSED_CLASS: &str = "input-focused";
pub const INPUT_TYPING_CLASS: &str = "input-typing";

pub const SENDING_LABEL: &str = "Sending...";

pub const ERROR_BORDER_COLOR: &str = "#e74c3c";
pub const SHAKE_ANIMATION: &str = "shake 0.5s";
pub const PRESSED_TRANSFORM: &str = "scale(0.98)";

pub const REVEAL_HIDDEN_OPACITY: &str = "0";
pub const REVEAL_HIDDEN_TRANSFORM: &str = "translateY(30px)";
pub const REVEAL_SHOWN_OPACITY: &str = "1";
pub const REVEAL_SHOWN_TRANSFORM: &str = "translateY(0)";
pub const REVEAL_TRANSITION: &str = "opacity 0.6s ease-out, transform 0.6s ease-out";
pub const CARD_HOVER_TRANSITION: &str = "all 0.3s ease";
