/// S3バケットへのオブジェクト保存
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::primitives::ByteStream;
use thiserror::Error;

use super::config::S3Config;

/// 保存オブジェクトのContent-Type
const JSON_CONTENT_TYPE: &str = "application/json";

/// ストレージ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    /// オブジェクトの書き込みに失敗（権限・ネットワーク・バケット不在など）
    #[error("Write error: {0}")]
    WriteError(String),
}

/// オブジェクトストア用トレイト
///
/// このトレイトはオブジェクト保存機能を抽象化し、
/// 異なる実装を可能にします（実際のS3、テスト用モック）。
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// JSONドキュメントをキーで保存
    ///
    /// 同じキーのオブジェクトが既に存在する場合は上書きする。
    ///
    /// # 引数
    /// * `key` - オブジェクト名（例: "123456.json"）
    /// * `body` - シリアライズ済みJSON
    async fn put_json(&self, key: &str, body: &str) -> Result<(), StorageError>;

    /// 保存先バケット名（ログ出力用）
    fn bucket(&self) -> &str;
}

/// ObjectStoreのS3実装
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    /// S3クライアント
    client: S3Client,
    /// 保存先バケット名
    bucket: String,
}

impl S3ObjectStore {
    /// 新しいS3ObjectStoreを作成
    ///
    /// # 引数
    /// * `client` - S3クライアント
    /// * `bucket` - 保存先バケット名（事前に作成済みであること）
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// 設定からS3ObjectStoreを作成
    pub fn from_config(config: &S3Config) -> Self {
        Self::new(config.client().clone(), config.bucket_name())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_json(&self, key: &str, body: &str) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(JSON_CONTENT_TYPE)
            .body(ByteStream::from(body.as_bytes().to_vec()))
            .send()
            .await
            .map_err(|e| {
                StorageError::WriteError(aws_sdk_s3::error::DisplayErrorContext(&e).to_string())
            })?;

        Ok(())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
