/// 取り込みLambda関数
///
/// ペイロードのAgeが範囲内であれば、Idをファイル名としてS3バケットに保存する。
///
/// # レスポンス
/// - 保存した場合・年齢が範囲外の場合: `{statusCode: 200, body: <イベントJSON>}`
/// - ペイロード不正: `{statusCode: 400, body: <エラーメッセージ>}`
/// - S3設定・書き込みエラー: 呼び出しエラー
use std::sync::OnceLock;

use ingest::application::IngestHandler;
use ingest::domain::{AgePolicy, IngestResponse};
use ingest::infrastructure::{S3Config, S3ConfigError, S3ObjectStore, init_logging};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{Instrument, info_span};

/// S3ObjectStoreの静的インスタンス
///
/// Lambda warm start時にクライアントを再利用するため、
/// 一度初期化したストアを静的に保持する。
static STORE: OnceCell<S3ObjectStore> = OnceCell::const_new();

/// 年齢範囲ポリシー（環境変数から一度だけ読み込む）
static POLICY: OnceLock<AgePolicy> = OnceLock::new();

/// S3ObjectStoreを取得（初期化されていなければ初期化）
async fn get_store() -> Result<&'static S3ObjectStore, S3ConfigError> {
    STORE
        .get_or_try_init(|| async {
            let config = S3Config::from_env().await?;
            Ok(S3ObjectStore::from_config(&config))
        })
        .await
}

fn get_policy() -> AgePolicy {
    *POLICY.get_or_init(AgePolicy::from_env)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// contextはrequest_idをログspanに記録するためだけに使用する。
async fn handler(event: LambdaEvent<Value>) -> Result<IngestResponse, Error> {
    let (payload, context) = event.into_parts();
    let span = info_span!("invocation", request_id = %context.request_id);

    async move {
        let store = get_store().await?;
        let ingest_handler = IngestHandler::with_policy(store.clone(), get_policy());

        let response = ingest_handler.handle_invocation(&payload).await?;
        Ok::<_, Error>(response)
    }
    .instrument(span)
    .await
}
