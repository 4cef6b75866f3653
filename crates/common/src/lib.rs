mod env;

pub use env::{load_dotenv, optional_var, required_var, EnvVars};
