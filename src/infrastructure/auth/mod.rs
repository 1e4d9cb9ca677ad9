mod static_auth_provider;

pub use static_auth_provider::StaticAuthProvider;
