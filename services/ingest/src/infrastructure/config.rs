/// S3接続設定
///
/// 保存先バケット名とS3クライアントを環境変数から構築する。
use aws_sdk_s3::Client as S3Client;
use thiserror::Error;

/// Terraformで事前作成済みの保存先バケット名
pub const DEFAULT_BUCKET_NAME: &str = "python-store-output-in-bucket";

/// 環境変数名: 保存先バケット名
pub const ENV_BUCKET_NAME: &str = "INGEST_BUCKET_NAME";

/// 環境変数名: S3エンドポイントの上書き（ローカル実行用）
pub const ENV_S3_ENDPOINT_URL: &str = "S3_ENDPOINT_URL";

/// S3設定のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum S3ConfigError {
    /// 環境変数が設定されているが空
    #[error("Empty environment variable: {0}")]
    EmptyEnvVar(String),
}

/// 環境変数から読み込んだS3設定値
///
/// クライアント構築前の純粋な値で、AWS設定の読み込みを伴わない。
#[derive(Debug, Clone, PartialEq)]
pub struct S3Settings {
    /// 保存先バケット名
    pub bucket_name: String,
    /// エンドポイントURLの上書き（未設定なら通常のS3）
    pub endpoint_url: Option<String>,
}

impl S3Settings {
    /// 環境変数から設定値を読み込み
    ///
    /// # 環境変数
    /// - INGEST_BUCKET_NAME: 保存先バケット名（未設定なら`DEFAULT_BUCKET_NAME`）
    /// - S3_ENDPOINT_URL: エンドポイントURL（LocalStack等、任意）
    pub fn from_env() -> Result<Self, S3ConfigError> {
        let bucket_name = match std::env::var(ENV_BUCKET_NAME) {
            Ok(value) if value.trim().is_empty() => {
                return Err(S3ConfigError::EmptyEnvVar(ENV_BUCKET_NAME.to_string()));
            }
            Ok(value) => value.trim().to_string(),
            Err(_) => DEFAULT_BUCKET_NAME.to_string(),
        };

        let endpoint_url = std::env::var(ENV_S3_ENDPOINT_URL)
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            bucket_name,
            endpoint_url,
        })
    }
}

/// バケット名とクライアントを持つS3設定
#[derive(Debug, Clone)]
pub struct S3Config {
    /// S3クライアントインスタンス
    client: S3Client,
    /// 保存先バケット名
    bucket_name: String,
}

impl S3Config {
    /// 環境からAWS設定を読み込み、環境変数からバケット名を読み取って新しいS3Configを作成
    ///
    /// AWS認証情報とリージョンはaws-configにより自動読み込み。
    /// `S3_ENDPOINT_URL`が設定されている場合はパススタイルでそのエンドポイントに接続する。
    pub async fn from_env() -> Result<Self, S3ConfigError> {
        let settings = S3Settings::from_env()?;

        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = build_client(&aws_config, settings.endpoint_url.as_deref());

        Ok(Self {
            client,
            bucket_name: settings.bucket_name,
        })
    }

    /// 明示的な値で新しいS3Configを作成（テスト用）
    pub fn new(client: S3Client, bucket_name: impl Into<String>) -> Self {
        Self {
            client,
            bucket_name: bucket_name.into(),
        }
    }

    /// S3クライアントへの参照を取得
    pub fn client(&self) -> &S3Client {
        &self.client
    }

    /// 保存先バケット名を取得
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}

/// SDK設定からS3クライアントを構築
///
/// エンドポイント上書き時はS3互換エミュレータ向けにパススタイルを強制する。
fn build_client(aws_config: &aws_config::SdkConfig, endpoint_url: Option<&str>) -> S3Client {
    let mut builder = aws_sdk_s3::config::Builder::from(aws_config);
    if let Some(url) = endpoint_url {
        builder = builder.endpoint_url(url).force_path_style(true);
    }
    S3Client::from_conf(builder.build())
}
