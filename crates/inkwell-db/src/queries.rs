use crate::Database;
use crate::models::{CommentRow, MediaRow, PostRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, email, username, password) VALUES (?1, ?2, ?3, ?4)",
                params![id, email, username, password_hash],
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email", email))
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    /// Partial update; absent fields keep their stored value.
    pub fn update_user(
        &self,
        id: &str,
        username: Option<&str>,
        password_hash: Option<&str>,
        profile_image: Option<&str>,
    ) -> Result<u64> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE users SET
                    username      = COALESCE(?2, username),
                    password      = COALESCE(?3, password),
                    profile_image = COALESCE(?4, profile_image)
                 WHERE id = ?1",
                params![id, username, password_hash, profile_image],
            )?;
            Ok(n as u64)
        })
    }

    /// Cascades to the user's posts, and through them to comments and media.
    pub fn delete_user(&self, id: &str) -> Result<u64> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
            Ok(n as u64)
        })
    }

    pub fn count_users(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let n: u64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(n)
        })
    }

    // -- Posts --

    pub fn create_post(
        &self,
        id: &str,
        title: &str,
        slug: &str,
        content: &str,
        author_id: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (id, title, slug, content, author_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, title, slug, content, author_id],
            )?;
            Ok(())
        })
    }

    pub fn get_post_by_id(&self, id: &str) -> Result<Option<PostRow>> {
        self.with_conn(|conn| query_post(conn, "id", id))
    }

    pub fn get_post_by_slug(&self, slug: &str) -> Result<Option<PostRow>> {
        self.with_conn(|conn| query_post(conn, "slug", slug))
    }

    pub fn slug_exists(&self, slug: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let n: u64 = conn.query_row(
                "SELECT COUNT(*) FROM posts WHERE slug = ?1",
                [slug],
                |row| row.get(0),
            )?;
            Ok(n > 0)
        })
    }

    /// Newest first.
    pub fn list_posts(&self, limit: u32, offset: u32) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, slug, content, author_id, published, created_at, updated_at
                 FROM posts
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?1 OFFSET ?2",
            )?;
            let rows = stmt
                .query_map(params![limit, offset], post_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Partial update; the slug is immutable and never touched here.
    pub fn update_post(
        &self,
        id: &str,
        title: Option<&str>,
        content: Option<&str>,
        published: Option<bool>,
    ) -> Result<u64> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE posts SET
                    title      = COALESCE(?2, title),
                    content    = COALESCE(?3, content),
                    published  = COALESCE(?4, published),
                    updated_at = datetime('now')
                 WHERE id = ?1",
                params![id, title, content, published],
            )?;
            Ok(n as u64)
        })
    }

    pub fn delete_post(&self, id: &str) -> Result<u64> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
            Ok(n as u64)
        })
    }

    // -- Comments --

    pub fn create_comment(
        &self,
        id: &str,
        content: &str,
        author_id: &str,
        post_id: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comments (id, content, author_id, post_id)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, content, author_id, post_id],
            )?;
            Ok(())
        })
    }

    pub fn get_comment_by_id(&self, id: &str) -> Result<Option<CommentRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, content, author_id, post_id, created_at
                 FROM comments WHERE id = ?1",
                [id],
                comment_from_row,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// Oldest first, thread order.
    pub fn list_comments_for_post(
        &self,
        post_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<CommentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, content, author_id, post_id, created_at
                 FROM comments
                 WHERE post_id = ?1
                 ORDER BY created_at ASC, rowid ASC
                 LIMIT ?2 OFFSET ?3",
            )?;
            let rows = stmt
                .query_map(params![post_id, limit, offset], comment_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_comment(&self, id: &str, content: Option<&str>) -> Result<u64> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE comments SET content = COALESCE(?2, content) WHERE id = ?1",
                params![id, content],
            )?;
            Ok(n as u64)
        })
    }

    pub fn delete_comment(&self, id: &str) -> Result<u64> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM comments WHERE id = ?1", [id])?;
            Ok(n as u64)
        })
    }

    // -- Media --

    pub fn create_media(
        &self,
        id: &str,
        url: &str,
        caption: Option<&str>,
        position: u32,
        post_id: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO media (id, url, caption, position, post_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, url, caption, position, post_id],
            )?;
            Ok(())
        })
    }

    pub fn get_media_by_id(&self, id: &str) -> Result<Option<MediaRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, url, caption, position, post_id, uploaded_at
                 FROM media WHERE id = ?1",
                [id],
                media_from_row,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// Ordered by position within the post.
    pub fn list_media_for_post(&self, post_id: &str) -> Result<Vec<MediaRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, url, caption, position, post_id, uploaded_at
                 FROM media
                 WHERE post_id = ?1
                 ORDER BY position ASC, rowid ASC",
            )?;
            let rows = stmt
                .query_map([post_id], media_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_media(
        &self,
        id: &str,
        url: Option<&str>,
        caption: Option<&str>,
        position: Option<u32>,
    ) -> Result<u64> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE media SET
                    url      = COALESCE(?2, url),
                    caption  = COALESCE(?3, caption),
                    position = COALESCE(?4, position)
                 WHERE id = ?1",
                params![id, url, caption, position],
            )?;
            Ok(n as u64)
        })
    }

    pub fn delete_media(&self, id: &str) -> Result<u64> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM media WHERE id = ?1", [id])?;
            Ok(n as u64)
        })
    }
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    // `column` is a compile-time constant ("id"/"email"), never user input.
    let sql = format!(
        "SELECT id, email, username, password, profile_image, created_at
         FROM users WHERE {} = ?1",
        column
    );
    conn.query_row(&sql, [value], |row| {
        Ok(UserRow {
            id: row.get(0)?,
            email: row.get(1)?,
            username: row.get(2)?,
            password: row.get(3)?,
            profile_image: row.get(4)?,
            created_at: row.get(5)?,
        })
    })
    .optional()
    .map_err(Into::into)
}

fn query_post(conn: &Connection, column: &str, value: &str) -> Result<Option<PostRow>> {
    let sql = format!(
        "SELECT id, title, slug, content, author_id, published, created_at, updated_at
         FROM posts WHERE {} = ?1",
        column
    );
    conn.query_row(&sql, [value], post_from_row)
        .optional()
        .map_err(Into::into)
}

fn post_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        content: row.get(3)?,
        author_id: row.get(4)?,
        published: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn comment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        id: row.get(0)?,
        content: row.get(1)?,
        author_id: row.get(2)?,
        post_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn media_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MediaRow> {
    Ok(MediaRow {
        id: row.get(0)?,
        url: row.get(1)?,
        caption: row.get(2)?,
        position: row.get(3)?,
        post_id: row.get(4)?,
        uploaded_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::{Database, is_unique_violation};
    use uuid::Uuid;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn seed_user(db: &Database, email: &str) -> String {
        let id = Uuid::new_v4().to_string();
        db.create_user(&id, email, "alice", "hash").unwrap();
        id
    }

    fn seed_post(db: &Database, author: &str, slug: &str) -> String {
        let id = Uuid::new_v4().to_string();
        db.create_post(&id, "Title", slug, "content", author).unwrap();
        id
    }

    #[test]
    fn duplicate_email_is_unique_violation() {
        let db = db();
        seed_user(&db, "a@x.com");
        let err = db
            .create_user(&Uuid::new_v4().to_string(), "a@x.com", "bob", "hash")
            .unwrap_err();
        assert!(is_unique_violation(&err));
        assert_eq!(db.count_users().unwrap(), 1);
    }

    #[test]
    fn duplicate_slug_is_unique_violation() {
        let db = db();
        let author = seed_user(&db, "a@x.com");
        seed_post(&db, &author, "hello-world");
        let err = db
            .create_post(&Uuid::new_v4().to_string(), "Other", "hello-world", "c", &author)
            .unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[test]
    fn partial_user_update_keeps_absent_fields() {
        let db = db();
        let id = seed_user(&db, "a@x.com");
        db.update_user(&id, Some("alice2"), None, None).unwrap();
        let row = db.get_user_by_id(&id).unwrap().unwrap();
        assert_eq!(row.username, "alice2");
        assert_eq!(row.password, "hash");
        assert_eq!(row.email, "a@x.com");
    }

    #[test]
    fn comments_list_in_thread_order() {
        let db = db();
        let author = seed_user(&db, "a@x.com");
        let post = seed_post(&db, &author, "p");
        for i in 0..3 {
            db.create_comment(&format!("c{}", i), &format!("comment {}", i), &author, &post)
                .unwrap();
        }
        let rows = db.list_comments_for_post(&post, 10, 0).unwrap();
        let contents: Vec<&str> = rows.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["comment 0", "comment 1", "comment 2"]);
    }

    #[test]
    fn posts_list_newest_first_with_offset() {
        let db = db();
        let author = seed_user(&db, "a@x.com");
        for i in 0..5 {
            seed_post(&db, &author, &format!("slug-{}", i));
        }
        let page = db.list_posts(2, 2).unwrap();
        let slugs: Vec<&str> = page.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["slug-2", "slug-1"]);
    }

    #[test]
    fn deleting_user_cascades_to_owned_rows() {
        let db = db();
        let author = seed_user(&db, "a@x.com");
        let post = seed_post(&db, &author, "p");
        db.create_comment("c1", "hi", &author, &post).unwrap();
        db.create_media("m1", "https://x.com/a.png", None, 0, &post).unwrap();

        db.delete_user(&author).unwrap();

        assert!(db.get_post_by_id(&post).unwrap().is_none());
        assert!(db.get_comment_by_id("c1").unwrap().is_none());
        assert!(db.get_media_by_id("m1").unwrap().is_none());
    }

    #[test]
    fn negative_media_position_violates_check() {
        let db = db();
        let author = seed_user(&db, "a@x.com");
        let post = seed_post(&db, &author, "p");
        let err = db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO media (id, url, position, post_id) VALUES ('m', 'u', -1, ?1)",
                [&post],
            )?;
            Ok(())
        });
        assert!(is_unique_violation(&err.unwrap_err()));
    }
}
