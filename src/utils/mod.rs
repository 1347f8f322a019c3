pub mod name_validation;
pub mod path;

pub use name_validation::{next_profile_name, validate_name, RESERVED_CHARS};
pub use path::{
    format_path_for_display, get_app_config_path, get_config_dir, get_home_dir, get_log_dir,
    get_profiles_dir,
};
