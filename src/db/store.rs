use crate::types::{AppError, Result};
use chrono::Utc;
use libsql::{Builder, Connection, Database};

/// Embedded relational store for users, the revoked-token ledger, and
/// shopping list data.
///
/// Backed by a local libsql database file; the schema is created on startup.
pub struct Store {
    db: Database,
}

impl Store {
    pub async fn open(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        let store = Self { db };
        store.initialize_schema().await?;

        Ok(store)
    }

    pub fn connection(&self) -> Result<Connection> {
        self.db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        // Users table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

        // Revoked-token ledger. Append-only: rows are never updated or
        // deleted, and the UNIQUE constraint makes a second revocation of
        // the same token a no-op at the storage layer.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS revoked_tokens (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                token TEXT UNIQUE NOT NULL,
                revoked_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create revoked_tokens table: {}", e)))?;

        // Shopping lists table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS shopping_lists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                FOREIGN KEY (owner_id) REFERENCES users(id)
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create shopping_lists table: {}", e)))?;

        // List items table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS list_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                list_id INTEGER NOT NULL,
                owner_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                FOREIGN KEY (list_id) REFERENCES shopping_lists(id)
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create list_items table: {}", e)))?;

        Ok(())
    }

    // ============= User operations =============

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        question: &str,
        answer: &str,
    ) -> Result<i64> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO users (username, email, password_hash, question, answer, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (username, email, password_hash, question, answer, now),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create user: {}", e)))?;

        Ok(conn.last_insert_rowid())
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, username, email, password_hash, question, answer, created_at
                 FROM users WHERE email = ?",
                [email],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(Self::user_from_row(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, username, email, password_hash, question, answer, created_at
                 FROM users WHERE id = ?",
                [id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(Self::user_from_row(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn update_password(&self, user_id: i64, password_hash: &str) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "UPDATE users SET password_hash = ? WHERE id = ?",
            (password_hash, user_id),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to update password: {}", e)))?;

        Ok(())
    }

    pub async fn update_account(&self, user_id: i64, username: &str, email: &str) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "UPDATE users SET username = ?, email = ? WHERE id = ?",
            (username, email, user_id),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to update account: {}", e)))?;

        Ok(())
    }

    fn user_from_row(row: &libsql::Row) -> Result<User> {
        Ok(User {
            id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
            username: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
            email: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
            password_hash: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
            question: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
            answer: row.get(5).map_err(|e| AppError::Database(e.to_string()))?,
            created_at: row.get(6).map_err(|e| AppError::Database(e.to_string()))?,
        })
    }

    // ============= Revoked-token ledger =============

    pub async fn revoke_token(&self, token: &str) -> Result<()> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO revoked_tokens (token, revoked_at) VALUES (?, ?)",
            (token, now),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to revoke token: {}", e)))?;

        Ok(())
    }

    pub async fn is_token_revoked(&self, token: &str) -> Result<bool> {
        let conn = self.connection()?;

        let mut rows = conn
            .query("SELECT 1 FROM revoked_tokens WHERE token = ?", [token])
            .await
            .map_err(|e| AppError::Database(format!("Failed to query ledger: {}", e)))?;

        Ok(rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .is_some())
    }

    // ============= Shopping list operations =============

    pub async fn create_list(&self, owner_id: i64, title: &str, description: &str) -> Result<i64> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO shopping_lists (owner_id, title, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            (owner_id, title, description, now, now),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create shopping list: {}", e)))?;

        Ok(conn.last_insert_rowid())
    }

    pub async fn get_list(&self, owner_id: i64, list_id: i64) -> Result<Option<ShoppingList>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, owner_id, title, description, created_at, updated_at
                 FROM shopping_lists WHERE id = ? AND owner_id = ?",
                (list_id, owner_id),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query shopping list: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(Self::list_from_row(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_list_by_title(&self, owner_id: i64, title: &str) -> Result<Option<ShoppingList>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, owner_id, title, description, created_at, updated_at
                 FROM shopping_lists WHERE owner_id = ? AND title = ?",
                (owner_id, title),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query shopping list: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(Self::list_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Fetches the user's shopping lists, optionally paginated.
    pub async fn get_lists(
        &self,
        owner_id: i64,
        page: Option<(i64, i64)>,
    ) -> Result<Vec<ShoppingList>> {
        let conn = self.connection()?;

        let mut rows = match page {
            Some((page, per_page)) => {
                let offset = (page - 1) * per_page;
                conn.query(
                    "SELECT id, owner_id, title, description, created_at, updated_at
                     FROM shopping_lists WHERE owner_id = ?
                     ORDER BY id ASC LIMIT ? OFFSET ?",
                    (owner_id, per_page, offset),
                )
                .await
            }
            None => {
                conn.query(
                    "SELECT id, owner_id, title, description, created_at, updated_at
                     FROM shopping_lists WHERE owner_id = ? ORDER BY id ASC",
                    [owner_id],
                )
                .await
            }
        }
        .map_err(|e| AppError::Database(format!("Failed to query shopping lists: {}", e)))?;

        let mut lists = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            lists.push(Self::list_from_row(&row)?);
        }

        Ok(lists)
    }

    pub async fn update_list(
        &self,
        owner_id: i64,
        list_id: i64,
        title: &str,
        description: &str,
    ) -> Result<()> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        conn.execute(
            "UPDATE shopping_lists SET title = ?, description = ?, updated_at = ?
             WHERE id = ? AND owner_id = ?",
            (title, description, now, list_id, owner_id),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to update shopping list: {}", e)))?;

        Ok(())
    }

    pub async fn delete_list(&self, owner_id: i64, list_id: i64) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "DELETE FROM list_items WHERE list_id = ? AND owner_id = ?",
            (list_id, owner_id),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to delete list items: {}", e)))?;

        conn.execute(
            "DELETE FROM shopping_lists WHERE id = ? AND owner_id = ?",
            (list_id, owner_id),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to delete shopping list: {}", e)))?;

        Ok(())
    }

    /// Substring search over the user's list titles.
    pub async fn search_lists(&self, owner_id: i64, query: &str) -> Result<Vec<ShoppingList>> {
        let conn = self.connection()?;
        let pattern = format!("%{}%", query);

        let mut rows = conn
            .query(
                "SELECT id, owner_id, title, description, created_at, updated_at
                 FROM shopping_lists WHERE owner_id = ? AND title LIKE ?
                 ORDER BY id ASC",
                (owner_id, pattern),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to search shopping lists: {}", e)))?;

        let mut lists = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            lists.push(Self::list_from_row(&row)?);
        }

        Ok(lists)
    }

    fn list_from_row(row: &libsql::Row) -> Result<ShoppingList> {
        Ok(ShoppingList {
            id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
            owner_id: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
            description: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
            created_at: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
            updated_at: row.get(5).map_err(|e| AppError::Database(e.to_string()))?,
        })
    }

    // ============= Item operations =============

    pub async fn create_item(
        &self,
        owner_id: i64,
        list_id: i64,
        title: &str,
        description: &str,
    ) -> Result<i64> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO list_items (list_id, owner_id, title, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (list_id, owner_id, title, description, now, now),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create item: {}", e)))?;

        Ok(conn.last_insert_rowid())
    }

    pub async fn get_item(
        &self,
        owner_id: i64,
        list_id: i64,
        item_id: i64,
    ) -> Result<Option<ListItem>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, list_id, owner_id, title, description, created_at, updated_at
                 FROM list_items WHERE id = ? AND list_id = ? AND owner_id = ?",
                (item_id, list_id, owner_id),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query item: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(Self::item_from_row(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_item_by_title(&self, owner_id: i64, title: &str) -> Result<Option<ListItem>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, list_id, owner_id, title, description, created_at, updated_at
                 FROM list_items WHERE owner_id = ? AND title = ?",
                (owner_id, title),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query item: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(Self::item_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Fetches a list's items, newest first, optionally paginated.
    pub async fn get_items(
        &self,
        owner_id: i64,
        list_id: i64,
        page: Option<(i64, i64)>,
    ) -> Result<Vec<ListItem>> {
        let conn = self.connection()?;

        let mut rows = match page {
            Some((page, per_page)) => {
                let offset = (page - 1) * per_page;
                conn.query(
                    "SELECT id, list_id, owner_id, title, description, created_at, updated_at
                     FROM list_items WHERE list_id = ? AND owner_id = ?
                     ORDER BY id DESC LIMIT ? OFFSET ?",
                    (list_id, owner_id, per_page, offset),
                )
                .await
            }
            None => {
                conn.query(
                    "SELECT id, list_id, owner_id, title, description, created_at, updated_at
                     FROM list_items WHERE list_id = ? AND owner_id = ? ORDER BY id DESC",
                    (list_id, owner_id),
                )
                .await
            }
        }
        .map_err(|e| AppError::Database(format!("Failed to query items: {}", e)))?;

        let mut items = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            items.push(Self::item_from_row(&row)?);
        }

        Ok(items)
    }

    pub async fn count_items(&self, owner_id: i64, list_id: i64) -> Result<i64> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM list_items WHERE list_id = ? AND owner_id = ?",
                (list_id, owner_id),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to count items: {}", e)))?;

        let row = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::Database("COUNT returned no rows".to_string()))?;

        row.get(0).map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn update_item(
        &self,
        owner_id: i64,
        list_id: i64,
        item_id: i64,
        title: &str,
        description: &str,
    ) -> Result<()> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        conn.execute(
            "UPDATE list_items SET title = ?, description = ?, updated_at = ?
             WHERE id = ? AND list_id = ? AND owner_id = ?",
            (title, description, now, item_id, list_id, owner_id),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to update item: {}", e)))?;

        Ok(())
    }

    pub async fn delete_item(&self, owner_id: i64, list_id: i64, item_id: i64) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "DELETE FROM list_items WHERE id = ? AND list_id = ? AND owner_id = ?",
            (item_id, list_id, owner_id),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to delete item: {}", e)))?;

        Ok(())
    }

    /// Substring search over item titles within one list.
    pub async fn search_items(
        &self,
        owner_id: i64,
        list_id: i64,
        query: &str,
    ) -> Result<Vec<ListItem>> {
        let conn = self.connection()?;
        let pattern = format!("%{}%", query);

        let mut rows = conn
            .query(
                "SELECT id, list_id, owner_id, title, description, created_at, updated_at
                 FROM list_items WHERE list_id = ? AND owner_id = ? AND title LIKE ?
                 ORDER BY id DESC",
                (list_id, owner_id, pattern),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to search items: {}", e)))?;

        let mut items = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            items.push(Self::item_from_row(&row)?);
        }

        Ok(items)
    }

    fn item_from_row(row: &libsql::Row) -> Result<ListItem> {
        Ok(ListItem {
            id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
            list_id: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
            owner_id: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
            description: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
            created_at: row.get(5).map_err(|e| AppError::Database(e.to_string()))?,
            updated_at: row.get(6).map_err(|e| AppError::Database(e.to_string()))?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub question: String,
    pub answer: String,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct ShoppingList {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone)]
pub struct ListItem {
    pub id: i64,
    pub list_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
}
