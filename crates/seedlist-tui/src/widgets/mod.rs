pub mod button;
pub mod link_button;
pub mod pane_chrome;
pub mod radio_button;
pub mod scrollable_list;
pub mod slider;
pub mod status_bar;
pub mod text_input;
pub mod toast;
