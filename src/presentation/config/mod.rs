mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AuthSettings, LoggingSettings, Settings, StoreProvider, StoreSettings, UploadSettings,
};
