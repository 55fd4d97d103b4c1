//! デバッグとログ機能
//!
//! プロジェクト全体のログ初期化と計測用のヘルパーを提供

use std::fs;
use tracing::{Level, debug, error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// デバッグ設定
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// ログレベル
    pub log_level: Level,
    /// ファイルログを有効にするか
    pub enable_file_logging: bool,
    /// ログファイルのディレクトリ
    pub log_directory: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            enable_file_logging: false,
            log_directory: "logs".to_string(),
        }
    }
}

impl DebugConfig {
    /// 開発環境用の設定
    pub fn development() -> Self {
        Self {
            log_level: Level::DEBUG,
            ..Self::default()
        }
    }

    /// 本番環境用の設定（日次ローテーションの JSON ファイルログ）
    pub fn production(log_directory: impl Into<String>) -> Self {
        Self {
            log_level: Level::INFO,
            enable_file_logging: true,
            log_directory: log_directory.into(),
        }
    }

    /// テスト環境用の設定
    pub fn test() -> Self {
        Self {
            log_level: Level::WARN,
            enable_file_logging: false,
            log_directory: "test_logs".to_string(),
        }
    }
}

/// ログシステムを初期化
///
/// `RUST_LOG` が設定されていればそちらを優先する。
pub fn init_logging(config: &DebugConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // 環境変数からのフィルター設定
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("photo_courier={}", config.log_level)))?;

    if config.enable_file_logging {
        fs::create_dir_all(&config.log_directory)?;
        let file_appender = RollingFileAppender::new(
            Rotation::DAILY,
            &config.log_directory,
            "photo-courier.log",
        );

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(file_appender)
            .json()
            .try_init()?;
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .try_init()?;
    }

    info!("ログシステムが初期化されました");
    debug!("デバッグ設定: {:?}", config);

    Ok(())
}

/// パフォーマンス測定用のマクロ
#[macro_export]
macro_rules! measure_time {
    ($name:expr, $block:block) => {{
        let start = std::time::Instant::now();
        let result = $block;
        let duration = start.elapsed();
        tracing::info!(
            operation = $name,
            duration_ms = duration.as_millis(),
            "操作完了"
        );
        result
    }};
}

/// エラーの詳細情報をエラーチェーンごとログに出力
pub fn log_error_details(error: &(dyn std::error::Error + 'static), context: &str) {
    error!(
        context = context,
        error = %error,
        "エラーが発生しました"
    );

    let mut source = error.source();
    let mut level = 1;
    while let Some(err) = source {
        error!(
            context = context,
            level = level,
            source_error = %err,
            "エラーの原因"
        );
        source = err.source();
        level += 1;
    }
}
