pub mod action_menu;
pub mod help;
pub mod toast;
