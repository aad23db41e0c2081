//! Shared constants for physlog.
//!
//! Table names, file names and the literal UI labels live here so the
//! storage, HTTP and CLI crates agree on them.

/// Registry table name.
pub const REGISTRY_TABLE: &str = "id_table";

/// Measurement table name.
pub const MEASUREMENT_TABLE: &str = "physical_rawdata";

/// Default file name of the registry database.
pub const REGISTRY_DB_FILE: &str = "id_database.db";

/// Default file name of the measurement database.
pub const MEASUREMENT_DB_FILE: &str = "physical_rawdata.db";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8501;

/// Default r2d2 pool size per table.
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Default number of attempts for a store call before giving up.
pub const DEFAULT_STORE_ATTEMPTS: u32 = 3;

pub const MSG_REGISTRY_ADDED: &str = "新しいIDが追加されました";
pub const MSG_MEASUREMENT_ADDED: &str = "新しいテストデータが追加されました";
pub const MSG_ROW_DELETED: &str = "一番下の行が削除されました";
pub const MSG_NOTHING_TO_DELETE: &str = "削除する行がありません";
pub const MSG_REFRESHED: &str = "データが更新されました";
pub const MSG_NO_DATA: &str = "該当データがありません";
pub const MSG_UNKNOWN_SUBJECT: &str = "入力された名前はIDリストに存在しません";
pub const MSG_NON_NUMERIC_RESULT: &str = "結果は数値型で入力してください";
pub const MSG_NON_NUMERIC_ID: &str = "IDは整数で入力してください";

/// Chart title: `{name} の {test} の推移`.
#[must_use]
pub fn chart_title(subject: &str, test_item: &str) -> String {
    format!("{subject} の {test_item} の推移")
}
