use std::sync::LazyLock;

use dotenv_codegen::dotenv;

pub static ENVIRONMENT: LazyLock<Environment> = LazyLock::new(|| Environment {
    api_protocol: dotenv!("API_PROTOCOL"),
    api_host: dotenv!("API_HOST"),
    api_port: dotenv!("API_PORT"),
    game_build_path: dotenv!("GAME_BUILD_PATH"),
});

pub struct Environment {
    pub api_protocol: &'static str,
    pub api_host: &'static str,
    pub api_port: &'static str,
    pub game_build_path: &'static str,
}

impl Environment {
    #[must_use]
    pub fn api_url(&self) -> String {
        format!(
            "{}://{}:{}",
            self.api_protocol, self.api_host, self.api_port
        )
    }
}
