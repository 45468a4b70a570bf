//! # Todo エンティティ
//!
//! このサービスが管理する唯一のエンティティ。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: `Title` / `Description` は生成時に検証され、
//!   空文字列がドメインに存在しないことを型レベルで保証する
//! - **状態遷移はメソッド経由**: フィールドは非公開とし、
//!   [`Todo::update`] / [`Todo::complete`] だけが状態を変更する
//! - **不変条件**: `completed_on` は `completed == true` のときに限り存在する
//!
//! ## ライフサイクル
//!
//! ```text
//! new() ──▶ 未完了（completed = false, completed_on = None）
//!              │ complete(now)
//!              ▼
//!           完了（completed = true, completed_on = Some(now)）
//! ```
//!
//! 完了から未完了へ戻す操作は存在しない。`complete` を再度呼ぶと
//! `completed_on` だけが新しい時刻で上書きされる。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

/// タイトルの最大文字数
const TITLE_MAX_LENGTH: usize = 200;

/// 説明の最大文字数
const DESCRIPTION_MAX_LENGTH: usize = 2000;

// =========================================================================
// TodoId
// =========================================================================

/// Todo の識別子（UUID v7）
///
/// 作成時にストア層ではなくドメイン層で採番する。UUID v7 は時刻順に
/// 単調増加するため、再利用されることはない。
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("{_0}")]
pub struct TodoId(Uuid);

impl TodoId {
    /// 新しい ID を生成する（UUID v7）
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID から ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 文字列表現から ID を復元する
    ///
    /// # エラー
    ///
    /// UUID として解釈できない文字列の場合は `DomainError::Validation` を返す。
    /// 不正な ID を 404 とみなすか 400 とみなすかは API 層の責務。
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| DomainError::Validation(format!("不正な Todo ID です: {value}")))
    }

    /// 内部の UUID 参照を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Title / Description（値オブジェクト）
// =========================================================================

/// Todo のタイトル（値オブジェクト）
///
/// 前後の空白を除去したうえで、空でないこと・最大文字数以内であることを
/// 生成時に検証する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title(String);

impl Title {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation("タイトルは必須です".to_string()));
        }

        if value.chars().count() > TITLE_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "タイトルは {TITLE_MAX_LENGTH} 文字以内である必要があります"
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Todo の説明（値オブジェクト）
///
/// バリデーション規則はタイトルと同じ（空不可・最大文字数のみ異なる）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description(String);

impl Description {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation("説明は必須です".to_string()));
        }

        if value.chars().count() > DESCRIPTION_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "説明は {DESCRIPTION_MAX_LENGTH} 文字以内である必要があります"
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// Todo エンティティ
// =========================================================================

/// Todo エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id:           TodoId,
    title:        Title,
    description:  Description,
    completed:    bool,
    completed_on: Option<DateTime<Utc>>,
}

impl Todo {
    /// 新しい Todo を作成する
    ///
    /// ID を採番し、未完了状態（`completed = false`, `completed_on = None`）
    /// で初期化する。
    pub fn new(title: Title, description: Description) -> Self {
        Self {
            id: TodoId::new(),
            title,
            description,
            completed: false,
            completed_on: None,
        }
    }

    /// ストアから取得した値でエンティティを復元する
    ///
    /// ID の採番や状態遷移は行わない。フィールドの整合性
    /// （`completed_on` と `completed` の対応）は呼び出し側＝インフラ層が
    /// ストアのデータを信頼して渡す。
    pub fn restore(
        id: TodoId,
        title: Title,
        description: Description,
        completed: bool,
        completed_on: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            completed,
            completed_on,
        }
    }

    /// タイトル・説明を更新する
    ///
    /// `Some` で渡されたフィールドだけを置き換え、`None` のフィールドは
    /// 変更しない。完了状態と完了時刻はこの操作では変化しない。
    pub fn update(&mut self, title: Option<Title>, description: Option<Description>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
    }

    /// Todo を完了にする
    ///
    /// `completed_on` は常に渡された現在時刻で再計算される。既に完了して
    /// いる場合もフラグは `true` のまま、時刻だけが上書きされる。
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.completed = true;
        self.completed_on = Some(now);
    }

    // ===== アクセサ =====

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn completed_on(&self) -> Option<DateTime<Utc>> {
        self.completed_on
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_todo() -> Todo {
        Todo::new(
            Title::new("牛乳を買う").unwrap(),
            Description::new("低脂肪 2%").unwrap(),
        )
    }

    // ===== TodoId =====

    #[test]
    fn test_todo_id_parseは正規のuuid文字列を受け付ける() {
        let id = TodoId::new();
        let parsed = TodoId::parse(&id.to_string()).unwrap();

        assert_eq!(parsed, id);
    }

    #[test]
    fn test_todo_id_parseは不正な文字列を拒否する() {
        let result = TodoId::parse("not-a-uuid");

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_todo_id_は生成のたびに異なる値になる() {
        assert_ne!(TodoId::new(), TodoId::new());
    }

    // ===== Title / Description =====

    #[test]
    fn test_titleは前後の空白を除去する() {
        let title = Title::new("  買い物  ").unwrap();

        assert_eq!(title.as_str(), "買い物");
    }

    #[test]
    fn test_titleは空文字列を拒否する() {
        assert!(matches!(Title::new(""), Err(DomainError::Validation(_))));
        assert!(matches!(Title::new("   "), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_titleは最大文字数を超えると拒否する() {
        let too_long = "あ".repeat(201);

        assert!(matches!(
            Title::new(too_long),
            Err(DomainError::Validation(_))
        ));
        assert!(Title::new("あ".repeat(200)).is_ok());
    }

    #[test]
    fn test_descriptionは空文字列を拒否する() {
        assert!(matches!(
            Description::new("  "),
            Err(DomainError::Validation(_))
        ));
    }

    // ===== Todo ライフサイクル =====

    #[test]
    fn test_newで未完了のtodoが作られる() {
        let todo = sample_todo();

        assert!(!todo.completed());
        assert_eq!(todo.completed_on(), None);
        assert_eq!(todo.title().as_str(), "牛乳を買う");
        assert_eq!(todo.description().as_str(), "低脂肪 2%");
    }

    #[test]
    fn test_updateは渡されたフィールドだけを置き換える() {
        let mut todo = sample_todo();
        let id = todo.id().clone();

        todo.update(Some(Title::new("パンを買う").unwrap()), None);

        assert_eq!(todo.id(), &id);
        assert_eq!(todo.title().as_str(), "パンを買う");
        assert_eq!(todo.description().as_str(), "低脂肪 2%");
        assert!(!todo.completed());
    }

    #[test]
    fn test_updateは完了状態を変更しない() {
        let mut todo = sample_todo();
        let now = Utc::now();
        todo.complete(now);

        todo.update(
            Some(Title::new("A").unwrap()),
            Some(Description::new("B").unwrap()),
        );

        assert!(todo.completed());
        assert_eq!(todo.completed_on(), Some(now));
    }

    #[test]
    fn test_completeでフラグと完了時刻が設定される() {
        let mut todo = sample_todo();
        let now = Utc::now();

        todo.complete(now);

        assert!(todo.completed());
        assert_eq!(todo.completed_on(), Some(now));
    }

    #[test]
    fn test_completeを二回呼ぶと完了時刻だけが進む() {
        let mut todo = sample_todo();
        let first = Utc::now();
        let second = first + Duration::seconds(10);

        todo.complete(first);
        todo.complete(second);

        assert!(todo.completed());
        assert_eq!(todo.completed_on(), Some(second));
    }

    #[test]
    fn test_restoreはフィールドをそのまま保持する() {
        let id = TodoId::new();
        let now = Utc::now();
        let todo = Todo::restore(
            id.clone(),
            Title::new("A").unwrap(),
            Description::new("B").unwrap(),
            true,
            Some(now),
        );

        assert_eq!(todo.id(), &id);
        assert!(todo.completed());
        assert_eq!(todo.completed_on(), Some(now));
    }
}
