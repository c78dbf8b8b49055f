use std::env;

pub const DEFAULT_TOKEN_URL: &str = "https://oauth.fatsecret.com/connect/token";
pub const DEFAULT_API_URL: &str = "https://platform.fatsecret.com/rest/server.api";
pub const DEFAULT_REGION: &str = "MX";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub token_url: String,
    pub api_url: String,
    pub region: String,
}

impl Config {
    /// 从环境变量加载配置，先读取 `.env`
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key))
    }

    /// 凭据必填，其余字段缺失或无法解析时使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|_| default.into());

        Ok(Config {
            client_id: lookup("FATSECRET_ID")?,
            client_secret: lookup("FATSECRET_SECRET")?,
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: lookup("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            token_url: optional("FATSECRET_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("FATSECRET_API_URL", DEFAULT_API_URL),
            region: optional("FATSECRET_REGION", DEFAULT_REGION),
        })
    }
}
