/// 取り込みハンドラー
///
/// ペイロードのAgeを検証し、範囲内であれば`"<Id>.json"`としてバケットに保存する。
/// 年齢が範囲外でもレスポンスは常に200（保存の有無のみが変わる）。
use serde_json::{Number, Value};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{AgeDecision, AgePolicy, IngestEvent, IngestResponse, ValidationError};
use crate::infrastructure::{ObjectStore, StorageError};

/// 取り込みハンドラーのエラー型
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestHandlerError {
    /// 必須フィールドの欠落・型不正
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] ValidationError),
    /// オブジェクトの書き込み失敗
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// イベントのシリアライズ失敗
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// 1回の呼び出しの処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// 保存した（keyは保存先オブジェクト名）
    Stored { key: String },
    /// 年齢が範囲外のため保存しなかった
    Rejected { age: Number },
}

/// 取り込みハンドラー
///
/// オブジェクトストアはコンストラクタで注入する。
pub struct IngestHandler<S>
where
    S: ObjectStore,
{
    /// 保存先オブジェクトストア
    store: S,
    /// 保存対象とする年齢範囲
    policy: AgePolicy,
}

impl<S> IngestHandler<S>
where
    S: ObjectStore,
{
    /// デフォルトの年齢範囲（50〜100）でIngestHandlerを作成
    pub fn new(store: S) -> Self {
        Self::with_policy(store, AgePolicy::default())
    }

    /// 年齢範囲を指定してIngestHandlerを作成
    pub fn with_policy(store: S, policy: AgePolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &AgePolicy {
        &self.policy
    }

    /// ペイロードを処理してレスポンスを返す
    ///
    /// # 処理フロー
    /// 1. ペイロードを`IngestEvent`にパース（不正なら`MalformedInput`）
    /// 2. イベントをJSONにシリアライズ
    /// 3. Ageが範囲内なら`"<Id>.json"`として保存
    /// 4. `{statusCode: 200, body: <シリアライズ済みイベント>}`を返す
    ///
    /// # 戻り値
    /// * 保存した場合・範囲外でスキップした場合ともに`Ok(IngestResponse)`
    /// * 入力不正・保存失敗時は`Err(IngestHandlerError)`
    pub async fn handle(&self, payload: &Value) -> Result<IngestResponse, IngestHandlerError> {
        let event = IngestEvent::from_value(payload)?;
        let body = serialize(&event)?;

        self.apply(&event, &body).await?;

        Ok(IngestResponse::ok(body))
    }

    /// ペイロードを処理し、入力不正を400レスポンスに変換する
    ///
    /// Lambdaエントリポイント用。保存失敗は呼び出しエラーとしてそのまま返す。
    pub async fn handle_invocation(
        &self,
        payload: &Value,
    ) -> Result<IngestResponse, IngestHandlerError> {
        match self.handle(payload).await {
            Ok(response) => Ok(response),
            Err(IngestHandlerError::MalformedInput(err)) => {
                warn!(error = %err, "不正なペイロードのため保存をスキップ");
                Ok(IngestResponse::bad_request(err.to_string()))
            }
            Err(err) => {
                error!(error = %err, "取り込み処理エラー");
                Err(err)
            }
        }
    }

    /// 検証済みイベントを処理する
    ///
    /// Ageが範囲内なら保存して`Stored`、範囲外なら`Rejected`を返す。
    pub async fn process(&self, event: &IngestEvent) -> Result<IngestOutcome, IngestHandlerError> {
        let body = serialize(event)?;
        self.apply(event, &body).await
    }

    async fn apply(
        &self,
        event: &IngestEvent,
        body: &str,
    ) -> Result<IngestOutcome, IngestHandlerError> {
        match self.policy.evaluate(event.age()) {
            AgeDecision::Accepted => {
                let key = event.object_key();
                self.store.put_json(&key, body).await?;

                info!(
                    object_key = %key,
                    bucket = self.store.bucket(),
                    "オブジェクト保存完了"
                );
                Ok(IngestOutcome::Stored { key })
            }
            AgeDecision::Rejected => {
                info!(
                    age = %event.age(),
                    min = self.policy.min(),
                    max = self.policy.max(),
                    "年齢が範囲外のため保存をスキップ"
                );
                Ok(IngestOutcome::Rejected {
                    age: event.age().clone(),
                })
            }
        }
    }
}

fn serialize(event: &IngestEvent) -> Result<String, IngestHandlerError> {
    event
        .to_json()
        .map_err(|e| IngestHandlerError::Serialization(e.to_string()))
}
