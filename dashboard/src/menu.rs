//! Menu screens. Every action is one service call; failures are printed as
//! inline warnings and the menu comes back.

use crate::console::{Answer, Console};
use crate::render;
use arcade_portal::catalog::{self, TableInfo, ACHIEVEMENT, GAME, ITEM, PLAYER};
use arcade_portal::service::{
    clamp_limit, ArcadeService, CrudService, CustomOutcome, RequestValidator, DEFAULT_LEADERBOARD_LIMIT,
    DEFAULT_PAGE_SIZE, DEFAULT_SESSION_LIMIT,
};
use arcade_portal::sql::BindValue;
use arcade_portal::AppError;
use serde_json::json;
use sqlx::MySqlPool;
use std::io::{self, Write};
use tokio::io::AsyncBufRead;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Unwrap an `Answer` inside a screen: skip ends the action, EOF ends the session.
macro_rules! answer {
    ($e:expr) => {
        match $e {
            Answer::Got(v) => v,
            Answer::Skip => return Ok(Flow::Continue),
            Answer::Eof => return Ok(Flow::Quit),
        }
    };
}

/// Print the value, or log and print the failure.
macro_rules! show {
    ($self:ident, $e:expr, |$v:ident| $body:expr) => {
        match $e {
            Ok($v) => $body,
            Err(err) => $self.fail(&err)?,
        }
    };
}

struct Menu {
    title: &'static str,
    options: &'static [(&'static str, &'static str)],
}

const MAIN: Menu = Menu {
    title: "Arcade dashboard",
    options: &[
        ("1", "Overview"),
        ("2", "Players"),
        ("3", "Games"),
        ("4", "Sessions"),
        ("5", "Items"),
        ("6", "Achievements"),
        ("7", "Leaderboard"),
        ("8", "Tables"),
        ("9", "Custom query"),
        ("0", "Quit"),
    ],
};

const PLAYERS: Menu = Menu {
    title: "Players",
    options: &[
        ("1", "List"),
        ("2", "Profile"),
        ("3", "Stats"),
        ("4", "Register"),
        ("5", "Edit"),
        ("6", "Delete"),
        ("0", "Back"),
    ],
};

const GAMES: Menu = Menu {
    title: "Games",
    options: &[
        ("1", "List"),
        ("2", "Detail"),
        ("3", "Add"),
        ("4", "Edit"),
        ("5", "Delete"),
        ("0", "Back"),
    ],
};

const SESSIONS: Menu = Menu {
    title: "Sessions",
    options: &[("1", "List"), ("2", "Detail"), ("3", "Complete"), ("0", "Back")],
};

const ITEMS: Menu = Menu {
    title: "Items",
    options: &[("1", "List"), ("2", "Award to player"), ("3", "Add"), ("0", "Back")],
};

const ACHIEVEMENTS: Menu = Menu {
    title: "Achievements",
    options: &[("1", "List"), ("2", "Check player"), ("3", "Add"), ("0", "Back")],
};

const TABLE: Menu = Menu {
    title: "Table",
    options: &[
        ("1", "Browse"),
        ("2", "View row"),
        ("3", "Insert"),
        ("4", "Update"),
        ("5", "Delete"),
        ("0", "Back"),
    ],
};

pub struct Dashboard<R, W> {
    pool: MySqlPool,
    console: Console<R, W>,
}

impl<R, W> Dashboard<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(pool: MySqlPool, input: R, output: W) -> Self {
        Dashboard {
            pool,
            console: Console::new(input, output),
        }
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    fn fail(&mut self, err: &AppError) -> io::Result<()> {
        let (_, code) = err.status_and_code();
        tracing::warn!(code, error = %err, "dashboard action failed");
        self.console.warn(err)
    }

    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(choice) = self.choose(&MAIN).await? else {
                break;
            };
            let flow = match choice {
                "1" => self.overview().await?,
                "2" => self.players().await?,
                "3" => self.games().await?,
                "4" => self.sessions().await?,
                "5" => self.items().await?,
                "6" => self.achievements().await?,
                "7" => self.leaderboard().await?,
                "8" => self.tables().await?,
                "9" => self.custom_query().await?,
                _ => Flow::Quit,
            };
            if flow == Flow::Quit {
                break;
            }
        }
        self.console.say("Bye.")
    }

    /// Show `menu` until a listed key is entered. `None` on EOF.
    async fn choose(&mut self, menu: &Menu) -> io::Result<Option<&'static str>> {
        loop {
            self.console.say(format!("\n== {} ==", menu.title))?;
            for (key, label) in menu.options {
                self.console.say(format!("  {}. {}", key, label))?;
            }
            let Some(raw) = self.console.ask("Select").await? else {
                return Ok(None);
            };
            let raw = raw.trim();
            if let Some((key, _)) = menu.options.iter().find(|(k, _)| *k == raw) {
                return Ok(Some(*key));
            }
            self.console.warn(format!("unknown option '{}'", raw))?;
        }
    }

    async fn overview(&mut self) -> io::Result<Flow> {
        let stats = ArcadeService::home_stats(&self.pool).await;
        self.console.say(format!("Total players:      {}", stats.total_players))?;
        self.console.say(format!("Total games:        {}", stats.total_games))?;
        self.console.say(format!("Active sessions:    {}", stats.active_sessions))?;
        self.console.say(format!("Total achievements: {}", stats.total_achievements))?;
        Ok(Flow::Continue)
    }

    async fn players(&mut self) -> io::Result<Flow> {
        loop {
            let Some(choice) = self.choose(&PLAYERS).await? else {
                return Ok(Flow::Quit);
            };
            let flow = match choice {
                "1" => {
                    show!(self, ArcadeService::list_players(&self.pool).await, |rows| self
                        .console
                        .say(render::records(&rows))?);
                    Flow::Continue
                }
                "2" => self.player_profile().await?,
                "3" => self.player_stats().await?,
                "4" => self.register_player().await?,
                "5" => self.edit_row(&PLAYER).await?,
                "6" => self.delete_row(&PLAYER).await?,
                _ => return Ok(Flow::Continue),
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    async fn player_profile(&mut self) -> io::Result<Flow> {
        let id = answer!(self.console.ask_number("Player ID", None).await?);
        show!(self, ArcadeService::player_profile(&self.pool, id).await, |profile| {
            self.console.say(render::record(&profile.player))?;
            self.console.say(format!("Achievement completion: {:.2}%", profile.completion))?;
            self.console.say("-- Achievements --")?;
            self.console.say(render::records(&profile.achievements))?;
            self.console.say("-- Items --")?;
            self.console.say(render::records(&profile.items))?;
        });
        Ok(Flow::Continue)
    }

    async fn player_stats(&mut self) -> io::Result<Flow> {
        let id = answer!(self.console.ask_number("Player ID", None).await?);
        show!(self, ArcadeService::player_stats(&self.pool, id).await, |stats| {
            self.console.say(format!("Rank:                   {}", stats.rank))?;
            self.console.say(format!("Achievement completion: {:.2}%", stats.achievement_completion))?;
            self.console.say(format!("Inventory count:        {}", stats.inventory_count))?;
        });
        Ok(Flow::Continue)
    }

    async fn register_player(&mut self) -> io::Result<Flow> {
        let Some(username) = self.console.ask("Username").await? else {
            return Ok(Flow::Quit);
        };
        let Some(email) = self.console.ask("Email").await? else {
            return Ok(Flow::Quit);
        };
        let Some(avatar) = self.console.ask("Avatar [default.png]").await? else {
            return Ok(Flow::Quit);
        };
        let req = match RequestValidator::register(&json!({
            "username": username,
            "email": email,
            "avatar": avatar,
        })) {
            Ok(req) => req,
            Err(e) => {
                self.fail(&e)?;
                return Ok(Flow::Continue);
            }
        };
        show!(
            self,
            ArcadeService::register_player(&self.pool, &req.username, &req.email, &req.avatar).await,
            |id| match id {
                Some(id) => self.console.say(format!("Registered player #{}", id))?,
                None => self.console.say("Registered player")?,
            }
        );
        Ok(Flow::Continue)
    }

    async fn games(&mut self) -> io::Result<Flow> {
        loop {
            let Some(choice) = self.choose(&GAMES).await? else {
                return Ok(Flow::Quit);
            };
            let flow = match choice {
                "1" => {
                    show!(self, ArcadeService::list_games(&self.pool).await, |rows| self
                        .console
                        .say(render::records(&rows))?);
                    Flow::Continue
                }
                "2" => self.game_detail().await?,
                "3" => self.insert_row(&GAME).await?,
                "4" => self.edit_row(&GAME).await?,
                "5" => self.delete_row(&GAME).await?,
                _ => return Ok(Flow::Continue),
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    async fn game_detail(&mut self) -> io::Result<Flow> {
        let id = answer!(self.console.ask_number("Game ID", None).await?);
        show!(self, ArcadeService::game_detail(&self.pool, id).await, |detail| {
            self.console.say(render::record(&detail.game))?;
            self.console.say("-- Levels --")?;
            self.console.say(render::records(&detail.levels))?;
            self.console.say("-- Recent sessions --")?;
            self.console.say(render::records(&detail.sessions))?;
        });
        Ok(Flow::Continue)
    }

    async fn sessions(&mut self) -> io::Result<Flow> {
        loop {
            let Some(choice) = self.choose(&SESSIONS).await? else {
                return Ok(Flow::Quit);
            };
            let flow = match choice {
                "1" => self.list_sessions().await?,
                "2" => self.session_detail().await?,
                "3" => self.complete_session().await?,
                _ => return Ok(Flow::Continue),
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    async fn list_sessions(&mut self) -> io::Result<Flow> {
        let limit = answer!(self.console.ask_number("Limit", Some(DEFAULT_SESSION_LIMIT as i64)).await?);
        let limit = clamp_limit(u32::try_from(limit).ok(), DEFAULT_SESSION_LIMIT);
        show!(self, ArcadeService::list_sessions(&self.pool, limit).await, |rows| self
            .console
            .say(render::records(&rows))?);
        Ok(Flow::Continue)
    }

    async fn session_detail(&mut self) -> io::Result<Flow> {
        let id = answer!(self.console.ask_number("Session ID", None).await?);
        show!(self, ArcadeService::session_detail(&self.pool, id).await, |detail| {
            self.console.say(render::record(&detail.session))?;
            self.console.say("-- Scores --")?;
            self.console.say(render::records(&detail.scores))?;
        });
        Ok(Flow::Continue)
    }

    async fn complete_session(&mut self) -> io::Result<Flow> {
        let id = answer!(self.console.ask_number("Session ID", None).await?);
        if !answer!(self.console.confirm(&format!("Complete session {}?", id)).await?) {
            return Ok(Flow::Continue);
        }
        show!(self, ArcadeService::complete_session(&self.pool, id).await, |_done| self
            .console
            .say(format!("Session {} completed", id))?);
        Ok(Flow::Continue)
    }

    async fn items(&mut self) -> io::Result<Flow> {
        loop {
            let Some(choice) = self.choose(&ITEMS).await? else {
                return Ok(Flow::Quit);
            };
            let flow = match choice {
                "1" => {
                    show!(self, ArcadeService::list_items(&self.pool).await, |rows| self
                        .console
                        .say(render::records(&rows))?);
                    Flow::Continue
                }
                "2" => self.award_item().await?,
                "3" => self.insert_row(&ITEM).await?,
                _ => return Ok(Flow::Continue),
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    async fn award_item(&mut self) -> io::Result<Flow> {
        let player_id = answer!(self.console.ask_number("Player ID", None).await?);
        let item_id = answer!(self.console.ask_number("Item ID", None).await?);
        let quantity = answer!(self.console.ask_number("Quantity", Some(1)).await?);
        let req = match RequestValidator::award_item(&json!({
            "player_id": player_id,
            "item_id": item_id,
            "quantity": quantity,
        })) {
            Ok(req) => req,
            Err(e) => {
                self.fail(&e)?;
                return Ok(Flow::Continue);
            }
        };
        show!(
            self,
            ArcadeService::award_item(&self.pool, req.player_id, req.item_id, req.quantity).await,
            |_done| self.console.say(format!(
                "Awarded {} x item {} to player {}",
                req.quantity, req.item_id, req.player_id
            ))?
        );
        Ok(Flow::Continue)
    }

    async fn achievements(&mut self) -> io::Result<Flow> {
        loop {
            let Some(choice) = self.choose(&ACHIEVEMENTS).await? else {
                return Ok(Flow::Quit);
            };
            let flow = match choice {
                "1" => {
                    show!(self, ArcadeService::list_achievements(&self.pool).await, |rows| self
                        .console
                        .say(render::records(&rows))?);
                    Flow::Continue
                }
                "2" => self.check_achievement().await?,
                "3" => self.insert_row(&ACHIEVEMENT).await?,
                _ => return Ok(Flow::Continue),
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    async fn check_achievement(&mut self) -> io::Result<Flow> {
        let player_id = answer!(self.console.ask_number("Player ID", None).await?);
        let achievement_id = answer!(self.console.ask_number("Achievement ID", None).await?);
        show!(
            self,
            ArcadeService::has_achievement(&self.pool, player_id, achievement_id).await,
            |has| self.console.say(format!(
                "Player {} {} achievement {}",
                player_id,
                if has { "has" } else { "does not have" },
                achievement_id
            ))?
        );
        Ok(Flow::Continue)
    }

    async fn leaderboard(&mut self) -> io::Result<Flow> {
        let limit = answer!(self.console.ask_number("Limit", Some(DEFAULT_LEADERBOARD_LIMIT as i64)).await?);
        let limit = clamp_limit(u32::try_from(limit).ok(), DEFAULT_LEADERBOARD_LIMIT);
        show!(self, ArcadeService::leaderboard(&self.pool, limit).await, |rows| self
            .console
            .say(render::records(&rows))?);
        Ok(Flow::Continue)
    }

    async fn tables(&mut self) -> io::Result<Flow> {
        let names: Vec<&str> = catalog::TABLES.iter().map(|t| t.name).collect();
        self.console.say(format!("Tables: {}", names.join(", ")))?;
        let Some(name) = self.console.ask("Table").await? else {
            return Ok(Flow::Quit);
        };
        let Some(table) = catalog::table(&name) else {
            if !name.trim().is_empty() {
                self.console.warn(format!("unknown table '{}'", name.trim()))?;
            }
            return Ok(Flow::Continue);
        };
        loop {
            let Some(choice) = self.choose(&TABLE).await? else {
                return Ok(Flow::Quit);
            };
            let flow = match choice {
                "1" => self.browse(table).await?,
                "2" => self.view_row(table).await?,
                "3" => self.insert_row(table).await?,
                "4" => self.edit_row(table).await?,
                "5" => self.delete_row(table).await?,
                _ => return Ok(Flow::Continue),
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    async fn browse(&mut self, table: &TableInfo) -> io::Result<Flow> {
        let page = answer!(self.console.ask_number("Page", Some(1)).await?).max(1);
        let offset = u32::try_from(page - 1).unwrap_or(0).saturating_mul(DEFAULT_PAGE_SIZE);
        show!(self, CrudService::list(&self.pool, table, DEFAULT_PAGE_SIZE, offset).await, |rows| self
            .console
            .say(render::result_table(&rows))?);
        Ok(Flow::Continue)
    }

    async fn view_row(&mut self, table: &TableInfo) -> io::Result<Flow> {
        let id = answer!(self.console.ask_number(table.pk, None).await?);
        show!(self, CrudService::read(&self.pool, table, id).await, |row| match row {
            Some(row) => self.console.say(render::result_table(&row))?,
            None => self.console.warn(format!("{} {} not found", table.name, id))?,
        });
        Ok(Flow::Continue)
    }

    /// Ask for each writable column. Blank leaves it out of the statement.
    async fn column_form(&mut self, table: &TableInfo) -> io::Result<Answer<Vec<(String, BindValue)>>> {
        let mut values = Vec::new();
        for column in table.writable_columns() {
            loop {
                let label = format!(
                    "{} ({:?}{})",
                    column.name,
                    column.kind,
                    if column.nullable { ", 'null' clears" } else { "" }
                );
                let Some(raw) = self.console.ask(&label).await? else {
                    return Ok(Answer::Eof);
                };
                if raw.trim().is_empty() {
                    break;
                }
                match BindValue::from_input(column, &raw) {
                    Ok(v) => {
                        values.push((column.name.to_string(), v));
                        break;
                    }
                    Err(e) => self.fail(&e)?,
                }
            }
        }
        if values.is_empty() {
            self.console.warn("no values entered")?;
            return Ok(Answer::Skip);
        }
        Ok(Answer::Got(values))
    }

    async fn insert_row(&mut self, table: &TableInfo) -> io::Result<Flow> {
        self.console.say(format!("New row in {} (blank to skip a column)", table.name))?;
        let values = answer!(self.column_form(table).await?);
        show!(self, CrudService::create(&self.pool, table, &values).await, |outcome| self
            .console
            .say(format!("Inserted {} #{}", table.name, outcome.last_insert_id))?);
        Ok(Flow::Continue)
    }

    async fn edit_row(&mut self, table: &TableInfo) -> io::Result<Flow> {
        let id = answer!(self.console.ask_number(table.pk, None).await?);
        match CrudService::read(&self.pool, table, id).await {
            Ok(Some(current)) => self.console.say(render::result_table(&current))?,
            Ok(None) => {
                self.console.warn(format!("{} {} not found", table.name, id))?;
                return Ok(Flow::Continue);
            }
            Err(e) => {
                self.fail(&e)?;
                return Ok(Flow::Continue);
            }
        }
        self.console.say("Enter new values (blank keeps the current one)")?;
        let values = answer!(self.column_form(table).await?);
        show!(self, CrudService::update(&self.pool, table, id, &values).await, |_outcome| self
            .console
            .say(format!("Updated {} {}", table.name, id))?);
        Ok(Flow::Continue)
    }

    async fn delete_row(&mut self, table: &TableInfo) -> io::Result<Flow> {
        let id = answer!(self.console.ask_number(table.pk, None).await?);
        if !answer!(self.console.confirm(&format!("Delete {} {}?", table.name, id)).await?) {
            return Ok(Flow::Continue);
        }
        show!(self, CrudService::delete(&self.pool, table, id).await, |_outcome| self
            .console
            .say(format!("Deleted {} {}", table.name, id))?);
        Ok(Flow::Continue)
    }

    /// Free-text SQL. Input ends at a line ending in ';' or at a blank line.
    async fn custom_query(&mut self) -> io::Result<Flow> {
        self.console.say("Enter SQL (end with ';' or a blank line)")?;
        let mut sql = String::new();
        loop {
            let Some(line) = self.console.ask(if sql.is_empty() { "sql" } else { "..." }).await? else {
                return Ok(Flow::Quit);
            };
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                break;
            }
            if let Some(stmt) = trimmed.strip_suffix(';') {
                sql.push_str(stmt);
                break;
            }
            sql.push_str(trimmed);
            sql.push('\n');
        }
        if sql.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        show!(self, CrudService::run_custom(&self.pool, &sql).await, |outcome| match outcome {
            CustomOutcome::Rows(table) => self.console.say(render::result_table(&table))?,
            CustomOutcome::Executed(done) => self.console.say(format!(
                "OK, {} row(s) affected{}",
                done.rows_affected,
                if done.last_insert_id > 0 {
                    format!(", last insert id {}", done.last_insert_id)
                } else {
                    String::new()
                }
            ))?,
        });
        Ok(Flow::Continue)
    }
}
