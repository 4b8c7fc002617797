use anyhow::Result;
use rusqlite::{params, Row};
use shared_types::{Contact, CreateContactRequest, Formality, Language, UpdateContactRequest};

use crate::database::Database;

const CONTACT_COLUMNS: &str = "id, email, english_job, french_job, company, first_name, \
     last_name, title, formality, role, cover_letter_language, email_language, processed, \
     created_at, updated_at";

fn row_to_contact(row: &Row) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        email: row.get(1)?,
        english_job: row.get(2)?,
        french_job: row.get(3)?,
        company: row.get(4)?,
        first_name: row.get(5)?,
        last_name: row.get(6)?,
        title: row.get(7)?,
        formality: Formality::parse(&row.get::<_, String>(8)?),
        role: row.get(9)?,
        cover_letter_language: Language::parse(&row.get::<_, String>(10)?),
        email_language: Language::parse(&row.get::<_, String>(11)?),
        processed: row.get(12)?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

pub fn list_contacts(db: &Database) -> Result<Vec<Contact>> {
    let conn = db.conn()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id"
    ))?;

    let contacts = stmt
        .query_map([], row_to_contact)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(contacts)
}

pub fn get_contact(db: &Database, id: i64) -> Result<Contact> {
    let conn = db.conn()?;
    conn.query_row(
        &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
        [id],
        row_to_contact,
    )
    .map_err(|e| anyhow::anyhow!("Failed to get contact {}: {}", id, e))
}

/// Insert a new contact. The processed flag starts false; only a confirmed
/// send flips it.
pub fn create_contact(db: &Database, req: &CreateContactRequest) -> Result<i64> {
    let conn = db.conn()?;
    let now = chrono::Utc::now().timestamp();

    let id: i64 = conn.query_row(
        "INSERT INTO contacts
         (email, english_job, french_job, company, first_name, last_name, title,
          formality, role, cover_letter_language, email_language, processed,
          created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 0, ?12, ?12)
         RETURNING id",
        params![
            req.email,
            req.english_job,
            req.french_job,
            req.company,
            req.first_name,
            req.last_name,
            req.title,
            req.formality.as_str(),
            req.role,
            req.cover_letter_language.as_str(),
            req.email_language.as_str(),
            now
        ],
        |row| row.get(0),
    )?;

    tracing::info!("Added contact {} for {}", id, req.email);
    Ok(id)
}

/// Rewrite a contact. Edits re-queue the record: processed always resets to
/// false here.
pub fn update_contact(db: &Database, id: i64, req: &UpdateContactRequest) -> Result<()> {
    let conn = db.conn()?;
    let now = chrono::Utc::now().timestamp();

    let changed = conn.execute(
        "UPDATE contacts
         SET email = ?1, english_job = ?2, french_job = ?3, company = ?4,
             first_name = ?5, last_name = ?6, title = ?7, formality = ?8,
             role = ?9, cover_letter_language = ?10, email_language = ?11,
             processed = 0, updated_at = ?12
         WHERE id = ?13",
        params![
            req.email,
            req.english_job,
            req.french_job,
            req.company,
            req.first_name,
            req.last_name,
            req.title,
            req.formality.as_str(),
            req.role,
            req.cover_letter_language.as_str(),
            req.email_language.as_str(),
            now,
            id
        ],
    )?;

    if changed == 0 {
        return Err(anyhow::anyhow!("Contact {} not found", id));
    }

    tracing::info!("Updated contact {}", id);
    Ok(())
}

pub fn delete_contact(db: &Database, id: i64) -> Result<()> {
    let conn = db.conn()?;
    let changed = conn.execute("DELETE FROM contacts WHERE id = ?1", [id])?;

    if changed == 0 {
        return Err(anyhow::anyhow!("Contact {} not found", id));
    }

    tracing::info!("Deleted contact {}", id);
    Ok(())
}

pub fn mark_processed(db: &Database, id: i64) -> Result<()> {
    let conn = db.conn()?;
    let now = chrono::Utc::now().timestamp();
    conn.execute(
        "UPDATE contacts SET processed = 1, updated_at = ?1 WHERE id = ?2",
        params![now, id],
    )?;

    tracing::info!("Marked contact {} as processed", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateContactRequest {
        CreateContactRequest {
            email: "a@b.com".to_string(),
            english_job: "Trading Assistant".to_string(),
            french_job: "Assistant Trader".to_string(),
            company: "Acme".to_string(),
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            title: "Mr.".to_string(),
            formality: Formality::Formal,
            role: "Trading Assistant".to_string(),
            cover_letter_language: Language::French,
            email_language: Language::English,
        }
    }

    #[test]
    fn test_create_and_get_round_trip() {
        let db = Database::in_memory().unwrap();
        let id = create_contact(&db, &request()).unwrap();

        let contact = get_contact(&db, id).unwrap();
        assert_eq!(contact.email, "a@b.com");
        assert_eq!(contact.cover_letter_language, Language::French);
        assert_eq!(contact.email_language, Language::English);
        assert!(!contact.processed);
    }

    #[test]
    fn test_update_resets_processed() {
        let db = Database::in_memory().unwrap();
        let id = create_contact(&db, &request()).unwrap();
        mark_processed(&db, id).unwrap();
        assert!(get_contact(&db, id).unwrap().processed);

        update_contact(&db, id, &request()).unwrap();
        assert!(!get_contact(&db, id).unwrap().processed);
    }

    #[test]
    fn test_delete_removes_record() {
        let db = Database::in_memory().unwrap();
        let id = create_contact(&db, &request()).unwrap();
        delete_contact(&db, id).unwrap();

        assert!(get_contact(&db, id).is_err());
        assert!(delete_contact(&db, id).is_err());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let db = Database::in_memory().unwrap();
        let mut req = request();
        let first = create_contact(&db, &req).unwrap();
        req.email = "c@d.com".to_string();
        let second = create_contact(&db, &req).unwrap();

        let contacts = list_contacts(&db).unwrap();
        assert_eq!(
            contacts.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![first, second]
        );
    }
}
