//! 应用配置
//!
//! 构建期通过环境变量注入（等价于打包器注入的 env），运行期不可变。

const DEFAULT_API_URL: &str = "http://localhost:3000";

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 后端服务基础地址（已去除结尾的 `/`）
    pub api_base_url: String,
    /// 日志级别
    pub log_level: log::LevelFilter,
}

impl AppConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        Self {
            api_base_url,
            log_level: log::LevelFilter::Info,
        }
    }

    /// 读取构建期环境变量 `SENTINEL_API_URL` 与 `SENTINEL_LOG`
    pub fn from_env() -> Self {
        let mut config = Self::new(option_env!("SENTINEL_API_URL").unwrap_or(DEFAULT_API_URL));
        config.log_level = parse_log_level(option_env!("SENTINEL_LOG"));
        config
    }

    /// 拼接完整 URL，保证基础地址与路径之间恰好一个 `/`
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.api_base_url, endpoint)
        } else {
            format!("{}/{}", self.api_base_url, endpoint)
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn parse_log_level(raw: Option<&str>) -> log::LevelFilter {
    raw.and_then(|s| s.parse().ok())
        .unwrap_or(log::LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = AppConfig::new("https://api.example.com///");
        assert_eq!(config.api_base_url, "https://api.example.com");
    }

    #[test]
    fn test_url_join() {
        let config = AppConfig::default();
        assert_eq!(config.url("/users/login"), "http://localhost:3000/users/login");
        assert_eq!(config.url("users/login"), "http://localhost:3000/users/login");
    }

    #[test]
    fn test_log_level_fallback() {
        assert_eq!(parse_log_level(Some("debug")), log::LevelFilter::Debug);
        assert_eq!(parse_log_level(Some("loud")), log::LevelFilter::Info);
        assert_eq!(parse_log_level(None), log::LevelFilter::Info);
    }
}
