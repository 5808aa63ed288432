pub mod activity_logger;
pub mod api_utils;
pub mod config;
pub mod confirm_dialog;
pub mod date_utils;
pub mod i18n;
pub mod icons;
pub mod list_utils;
pub mod master_detail;
pub mod modal_frame;
pub mod palette;
pub mod route_selection;
pub mod theme;
pub mod time_ago;
