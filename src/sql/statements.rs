//! Fixed statements behind the page views. Every value is a `?` placeholder.

pub const LIST_PLAYERS: &str = "\
SELECT p.PlayerID, p.Username, p.Email, p.TotalScore, p.Avatar, r.RankName, p.RegistrationDate
FROM player p
LEFT JOIN ranks r ON p.RankID = r.RankID
ORDER BY p.TotalScore DESC";

pub const PLAYER_BY_ID: &str = "\
SELECT p.*, r.RankName
FROM player p
LEFT JOIN ranks r ON p.RankID = r.RankID
WHERE p.PlayerID = ?";

pub const PLAYER_ACHIEVEMENTS: &str = "\
SELECT a.AchievementID, a.Name, a.Description, pa.DateEarned
FROM playerachievement pa
JOIN achievement a ON pa.AchievementID = a.AchievementID
WHERE pa.PlayerID = ?
ORDER BY pa.DateEarned DESC";

pub const PLAYER_ITEMS: &str = "\
SELECT i.ItemID, i.ItemName, i.ItemType, i.Rarity, pi.Quantity, pi.DateObtained
FROM playeritem pi
JOIN item i ON pi.ItemID = i.ItemID
WHERE pi.PlayerID = ?
ORDER BY pi.DateObtained DESC";

pub const LIST_GAMES: &str = "SELECT * FROM game ORDER BY ReleaseDate DESC";

pub const GAME_BY_ID: &str = "SELECT * FROM game WHERE GameID = ?";

pub const GAME_LEVELS: &str = "\
SELECT LevelID, LevelNumber, Difficulty, Description
FROM level
WHERE GameID = ?
ORDER BY LevelNumber";

pub const GAME_RECENT_SESSIONS: &str = "\
SELECT ms.SessionID, ms.StartTime, ms.EndTime, COUNT(ps.PlayerSessionID) AS PlayerCount
FROM multiplayersession ms
LEFT JOIN playersession ps ON ms.SessionID = ps.SessionID
WHERE ms.GameID = ?
GROUP BY ms.SessionID, ms.StartTime, ms.EndTime
ORDER BY ms.StartTime DESC
LIMIT 10";

pub const LIST_SESSIONS: &str = "\
SELECT ms.SessionID, g.Title AS GameTitle, ms.StartTime, ms.EndTime, COUNT(ps.PlayerSessionID) AS PlayerCount
FROM multiplayersession ms
JOIN game g ON ms.GameID = g.GameID
LEFT JOIN playersession ps ON ms.SessionID = ps.SessionID
GROUP BY ms.SessionID, g.Title, ms.StartTime, ms.EndTime
ORDER BY ms.StartTime DESC
LIMIT ?";

pub const SESSION_BY_ID: &str = "\
SELECT ms.*, g.Title AS GameTitle
FROM multiplayersession ms
JOIN game g ON ms.GameID = g.GameID
WHERE ms.SessionID = ?";

pub const SESSION_SCORES: &str = "\
SELECT ps.Position, p.Username, ps.Score, p.PlayerID
FROM playersession ps
JOIN player p ON ps.PlayerID = p.PlayerID
WHERE ps.SessionID = ?
ORDER BY ps.Position, ps.Score DESC";

pub const LIST_ACHIEVEMENTS: &str = "\
SELECT a.AchievementID, a.Name, a.Description, COUNT(pa.PlayerID) AS EarnedBy
FROM achievement a
LEFT JOIN playerachievement pa ON a.AchievementID = pa.AchievementID
GROUP BY a.AchievementID, a.Name, a.Description
ORDER BY a.AchievementID";

pub const LIST_ITEMS: &str = "SELECT ItemID, ItemName, ItemType, Rarity FROM item ORDER BY ItemID";

pub const LAST_INSERT_ID: &str = "SELECT LAST_INSERT_ID() AS player_id";
