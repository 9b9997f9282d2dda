//! Static description of the arcade tables that the dashboard can browse and edit.
//! Identifiers used in generated SQL come only from here.

/// Coarse column kind, used to parse form input and to pick bind types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Decimal,
    Text,
    Date,
    DateTime,
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnInfo {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    /// Generated or trigger-maintained columns are shown but never written.
    pub writable: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct TableInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub pk: &'static str,
    /// Column used for default ordering in list views.
    pub order_by: &'static str,
    pub columns: &'static [ColumnInfo],
}

const fn col(name: &'static str, kind: ColumnKind, nullable: bool, writable: bool) -> ColumnInfo {
    ColumnInfo {
        name,
        kind,
        nullable,
        writable,
    }
}

use ColumnKind::*;

pub const PLAYER: TableInfo = TableInfo {
    name: "player",
    label: "Players",
    pk: "PlayerID",
    order_by: "PlayerID",
    columns: &[
        col("PlayerID", Integer, false, false),
        col("Username", Text, false, true),
        col("Email", Text, false, true),
        col("TotalScore", Integer, false, true),
        col("Avatar", Text, true, true),
        col("RegistrationDate", DateTime, true, false),
        // maintained by the rank trigger
        col("RankID", Integer, true, false),
    ],
};

pub const RANKS: TableInfo = TableInfo {
    name: "ranks",
    label: "Ranks",
    pk: "RankID",
    order_by: "RankScore",
    columns: &[
        col("RankID", Integer, false, false),
        col("RankName", Text, false, true),
        col("RankScore", Integer, false, true),
    ],
};

pub const GAME: TableInfo = TableInfo {
    name: "game",
    label: "Games",
    pk: "GameID",
    order_by: "GameID",
    columns: &[
        col("GameID", Integer, false, false),
        col("Title", Text, false, true),
        col("Genre", Text, true, true),
        col("MaxPlayers", Integer, true, true),
        col("ReleaseDate", Date, true, true),
    ],
};

pub const LEVEL: TableInfo = TableInfo {
    name: "level",
    label: "Levels",
    pk: "LevelID",
    order_by: "LevelID",
    columns: &[
        col("LevelID", Integer, false, false),
        col("GameID", Integer, false, true),
        col("LevelNumber", Integer, false, true),
        col("Difficulty", Text, true, true),
        col("Description", Text, true, true),
    ],
};

pub const ACHIEVEMENT: TableInfo = TableInfo {
    name: "achievement",
    label: "Achievements",
    pk: "AchievementID",
    order_by: "AchievementID",
    columns: &[
        col("AchievementID", Integer, false, false),
        col("Name", Text, false, true),
        col("Description", Text, true, true),
    ],
};

pub const ITEM: TableInfo = TableInfo {
    name: "item",
    label: "Items",
    pk: "ItemID",
    order_by: "ItemID",
    columns: &[
        col("ItemID", Integer, false, false),
        col("ItemName", Text, false, true),
        col("ItemType", Text, true, true),
        col("Rarity", Text, true, true),
    ],
};

pub const MULTIPLAYER_SESSION: TableInfo = TableInfo {
    name: "multiplayersession",
    label: "Sessions",
    pk: "SessionID",
    order_by: "StartTime",
    columns: &[
        col("SessionID", Integer, false, false),
        col("GameID", Integer, false, true),
        col("StartTime", DateTime, false, true),
        col("EndTime", DateTime, true, true),
    ],
};

pub const TABLES: &[TableInfo] = &[PLAYER, RANKS, GAME, LEVEL, ACHIEVEMENT, ITEM, MULTIPLAYER_SESSION];

/// Case-insensitive lookup by physical table name.
pub fn table(name: &str) -> Option<&'static TableInfo> {
    let name = name.trim();
    TABLES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

impl TableInfo {
    pub fn column(&self, name: &str) -> Option<&'static ColumnInfo> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn writable_columns(&self) -> impl Iterator<Item = &'static ColumnInfo> {
        self.columns.iter().filter(|c| c.writable)
    }
}
