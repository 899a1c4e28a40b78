use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::finance::{InputParameters, Timeframe};

/// 기본 설정 파일 경로.
pub const CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다. 입력 시나리오는 저장하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/en-us/fr-fr)
    pub language: String,
    /// 사용자 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    /// 창 투명도 (0.3~1.0)
    pub window_alpha: f32,
    /// 시작 시 통화 라벨
    pub default_currency: String,
    /// 시작 시 차트 집계 단위
    pub default_timeframe: Timeframe,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            window_alpha: 1.0,
            default_currency: "USD".to_string(),
            default_timeframe: Timeframe::Monthly,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse failed: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialization failed: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Config {
    /// 설정의 표시 기본값을 반영한 초기 입력값.
    pub fn initial_inputs(&self) -> InputParameters {
        InputParameters::default()
            .with_currency(&self.default_currency)
            .with_timeframe(self.default_timeframe)
    }

    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_PATH))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_create(Path::new(CONFIG_PATH))
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본값을 저장한 뒤 돌려준다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        info!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("roi_cfg_{}_{name}.toml", std::process::id()))
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let path = temp_path("create");
        let _ = fs::remove_file(&path);
        let cfg = load_or_create(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn partial_file_fills_defaults() {
        let path = temp_path("partial");
        fs::write(&path, "default_currency = \"EUR\"\ndefault_timeframe = \"yearly\"\n").unwrap();
        let cfg = load_or_create(&path).unwrap();
        assert_eq!(cfg.default_currency, "EUR");
        assert_eq!(cfg.default_timeframe, Timeframe::Yearly);
        assert_eq!(cfg.language, "auto");
        let inputs = cfg.initial_inputs();
        assert_eq!(inputs.currency, "EUR");
        assert_eq!(inputs.timeframe, Timeframe::Yearly);
        assert_eq!(inputs.purchase_cost, 200_000.0);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn save_then_load_keeps_values() {
        let path = temp_path("roundtrip");
        let cfg = Config {
            language: "fr-fr".into(),
            window_alpha: 0.8,
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();
        assert_eq!(load_or_create(&path).unwrap(), cfg);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = temp_path("broken");
        fs::write(&path, "window_alpha = [").unwrap();
        assert!(matches!(load_or_create(&path), Err(ConfigError::Parse(_))));
        fs::remove_file(&path).ok();
    }
}
