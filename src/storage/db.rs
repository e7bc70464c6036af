use chrono::NaiveDate;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, Result};

use crate::core::error::AppResult;

/// Анкета зарегистрированного пользователя.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Telegram ID пользователя
    pub user_id: i64,
    /// Имя, введённое при регистрации
    pub first_name: String,
    /// Фамилия, введённая при регистрации
    pub last_name: String,
}

/// Запись о баллах по одному предмету.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectScore {
    /// Telegram ID пользователя
    pub user_id: i64,
    /// Название предмета
    pub subject_name: String,
    /// Баллы (0–100, проверяются при вводе)
    pub points: u8,
}

/// Сообщение пользователя, попавшее в эхо-обработчик.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub user_id: i64,
    pub text: String,
    /// Дата получения в формате ДД.ММ.ГГГГ
    pub day: String,
}

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Create a new database connection pool
///
/// Opens (and creates, if absent) the SQLite file, then makes sure the three
/// tables exist. `":memory:"` gives a private in-memory database; keep
/// `max_size` at 1 in that case, every pooled connection would otherwise see
/// its own empty database.
///
/// # Arguments
///
/// * `database_path` - Path to SQLite database file
/// * `max_size` - Maximum number of pooled connections
///
/// # Example
///
/// ```no_run
/// use examscore_bot::storage::db;
///
/// let pool = db::create_pool("db_bota.db", 1)?;
/// # Ok::<(), examscore_bot::core::AppError>(())
/// ```
pub fn create_pool(database_path: &str, max_size: u32) -> AppResult<DbPool> {
    let manager = if database_path == ":memory:" {
        SqliteConnectionManager::memory()
    } else {
        SqliteConnectionManager::file(database_path)
    };
    let pool = Pool::builder().max_size(max_size.max(1)).build(manager)?;

    let conn = pool.get()?;
    initialize(&conn)?;
    log::info!("Database ready at {} (pool size {})", database_path, max_size.max(1));

    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, r2d2::Error> {
    pool.get()
}

/// Создаёт таблицы, если их ещё нет. Повторный вызов ничего не меняет.
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS profile (
            user_id INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS educational_subjects (
            user_id INTEGER NOT NULL,
            name_subject TEXT NOT NULL,
            points_subject INTEGER NOT NULL
        );
        CREATE TABLE IF NOT EXISTS message_from_users (
            user_id INTEGER NOT NULL,
            message TEXT NOT NULL,
            day TEXT NOT NULL
        );",
    )
}

/// Сохраняет анкету пользователя после завершения регистрации.
///
/// Проверки на повторную регистрацию здесь нет: вызывающий код обязан
/// сначала убедиться через `registration::is_registered`, что анкеты ещё нет.
///
/// # Errors
///
/// Возвращает ошибку БД, в том числе нарушение PRIMARY KEY при повторной вставке.
pub fn create_profile(conn: &Connection, user_id: i64, first_name: &str, last_name: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO profile (user_id, first_name, last_name) VALUES (?1, ?2, ?3)",
        params![user_id, first_name, last_name],
    )?;
    Ok(())
}

/// Получает анкету пользователя по Telegram ID.
///
/// # Returns
///
/// Пустой вектор для незарегистрированного пользователя, иначе одна запись.
pub fn get_profile(conn: &Connection, user_id: i64) -> Result<Vec<Profile>> {
    let mut stmt = conn.prepare("SELECT user_id, first_name, last_name FROM profile WHERE user_id = ?1")?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(Profile {
            user_id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
        })
    })?;

    rows.collect()
}

/// Добавляет запись о баллах по предмету. Дубликаты допускаются.
pub fn create_subject_score(conn: &Connection, user_id: i64, subject_name: &str, points: u8) -> Result<()> {
    conn.execute(
        "INSERT INTO educational_subjects (user_id, name_subject, points_subject) VALUES (?1, ?2, ?3)",
        params![user_id, subject_name, points],
    )?;
    Ok(())
}

/// Получает все записи о баллах пользователя в порядке хранения.
pub fn get_subject_scores(conn: &Connection, user_id: i64) -> Result<Vec<SubjectScore>> {
    let mut stmt =
        conn.prepare("SELECT user_id, name_subject, points_subject FROM educational_subjects WHERE user_id = ?1")?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(SubjectScore {
            user_id: row.get(0)?,
            subject_name: row.get(1)?,
            points: row.get(2)?,
        })
    })?;

    rows.collect()
}

/// Логирует сообщение пользователя, не относящееся к командам и анкетам.
///
/// # Arguments
///
/// * `day` - Дата получения, см. [`format_day`]
pub fn log_message(conn: &Connection, user_id: i64, text: &str, day: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO message_from_users (user_id, message, day) VALUES (?1, ?2, ?3)",
        params![user_id, text, day],
    )?;
    Ok(())
}

/// Читает журнал сообщений пользователя. Боту не нужен, используется
/// для диагностики и в тестах.
pub fn get_logged_messages(conn: &Connection, user_id: i64) -> Result<Vec<InboundMessage>> {
    let mut stmt = conn.prepare("SELECT user_id, message, day FROM message_from_users WHERE user_id = ?1")?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(InboundMessage {
            user_id: row.get(0)?,
            text: row.get(1)?,
            day: row.get(2)?,
        })
    })?;

    rows.collect()
}

/// Форматирует дату как ДД.ММ.ГГГГ.
pub fn format_day(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Сегодняшняя дата (по локальному времени) в формате журнала сообщений.
pub fn today() -> String {
    format_day(chrono::Local::now().date_naive())
}
