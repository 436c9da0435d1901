use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::{
    auth::password::{hash_password, verify_password},
    error::{AppError, ValidationError},
    model::{
        employee::Employee,
        timesheet::{NewEntry, TimesheetEntry, TimesheetRow},
    },
    notify::marker::UpdateMarker,
};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        employee_id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        password_hash TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS timesheet (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id TEXT NOT NULL REFERENCES employees (employee_id),
        project_name TEXT NOT NULL,
        task_description TEXT NOT NULL,
        hours_worked REAL NOT NULL CHECK (hours_worked > 0),
        submission_date DATE NOT NULL,
        submission_time TIME NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_timesheet_day
    ON timesheet (submission_date, submission_time)
    "#,
];

const ROW_COLUMNS: &str = r#"
    t.id, t.employee_id, t.project_name, t.task_description, t.hours_worked,
    t.submission_date, t.submission_time, e.name AS employee_name
"#;

/// Employees and entries for one date, read inside a single transaction.
#[derive(Debug, Clone)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub employees: Vec<Employee>,
    pub rows: Vec<TimesheetRow>,
}

impl DaySnapshot {
    pub fn entries(&self) -> Vec<TimesheetEntry> {
        self.rows.iter().map(|r| r.entry.clone()).collect()
    }
}

/// Access to persisted employees and timesheet entries. Every successful
/// mutation advances the shared [`UpdateMarker`] after its row is committed.
#[derive(Clone)]
pub struct TimesheetStore {
    pool: SqlitePool,
    marker: UpdateMarker,
}

/// Rejects blank text. The value itself is stored exactly as given.
fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::BlankField(field))
    } else {
        Ok(value)
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

impl TimesheetStore {
    pub fn new(pool: SqlitePool, marker: UpdateMarker) -> Self {
        Self { pool, marker }
    }

    pub fn marker(&self) -> &UpdateMarker {
        &self.marker
    }

    pub async fn init_schema(&self) -> Result<(), AppError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    // -------------------- employees --------------------

    pub async fn register_employee(
        &self,
        employee_id: &str,
        name: &str,
        password: &str,
    ) -> Result<Employee, AppError> {
        let employee_id = required("employee_id", employee_id)?;
        let name = required("name", name)?;
        if password.is_empty() {
            return Err(ValidationError::BlankField("password").into());
        }

        let password_hash = hash_password(password)?;

        let result = sqlx::query(
            r#"INSERT INTO employees (employee_id, name, password_hash) VALUES (?, ?, ?)"#,
        )
        .bind(employee_id)
        .bind(name)
        .bind(&password_hash)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(AppError::UniquenessViolation(employee_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        // a new employee adds an Absent row to every status map
        let marker = self.marker.bump();
        info!(employee_id, marker, "Employee registered");

        Ok(Employee {
            employee_id: employee_id.to_string(),
            name: name.to_string(),
            password_hash,
        })
    }

    pub async fn find_employee(&self, employee_id: &str) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT employee_id, name, password_hash
            FROM employees
            WHERE employee_id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn get_employee(&self, employee_id: &str) -> Result<Employee, AppError> {
        self.find_employee(employee_id)
            .await?
            .ok_or_else(|| AppError::NotFound(employee_id.to_string()))
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT employee_id, name, password_hash FROM employees ORDER BY employee_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    /// `false` for an unknown employee as well as for a wrong password.
    pub async fn verify_credentials(
        &self,
        employee_id: &str,
        password: &str,
    ) -> Result<bool, AppError> {
        Ok(match self.find_employee(employee_id).await? {
            Some(employee) => verify_password(password, &employee.password_hash),
            None => false,
        })
    }

    pub async fn change_password(
        &self,
        employee_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if new_password.is_empty() {
            return Err(ValidationError::BlankField("new_password").into());
        }

        let employee = self.get_employee(employee_id).await?;
        if !verify_password(current_password, &employee.password_hash) {
            return Err(ValidationError::WrongPassword.into());
        }

        let password_hash = hash_password(new_password)?;
        sqlx::query("UPDATE employees SET password_hash = ? WHERE employee_id = ?")
            .bind(&password_hash)
            .bind(employee_id)
            .execute(&self.pool)
            .await?;

        info!(employee_id, "Password changed");
        Ok(())
    }

    // -------------------- timesheet --------------------

    /// Validates and persists one entry, then advances the marker. Nothing is
    /// written and the marker is untouched when validation fails.
    pub async fn append_entry(&self, entry: NewEntry) -> Result<TimesheetEntry, AppError> {
        if !(entry.hours_worked.is_finite() && entry.hours_worked > 0.0) {
            return Err(ValidationError::NonPositiveHours(entry.hours_worked).into());
        }
        let employee_id = required("employee_id", &entry.employee_id)?;
        let project_name = required("project_name", &entry.project_name)?;
        let task_description = required("task_description", &entry.task_description)?;

        let mut tx = self.pool.begin().await?;

        let known = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE employee_id = ? LIMIT 1)",
        )
        .bind(employee_id)
        .fetch_one(&mut *tx)
        .await?;

        if !known {
            return Err(ValidationError::UnknownEmployee(employee_id.to_string()).into());
        }

        let id = sqlx::query(
            r#"
            INSERT INTO timesheet
            (employee_id, project_name, task_description, hours_worked, submission_date, submission_time)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(employee_id)
        .bind(project_name)
        .bind(task_description)
        .bind(entry.hours_worked)
        .bind(entry.submission_date)
        .bind(entry.submission_time)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;

        // no await between the commit and the bump
        let marker = self.marker.bump();
        debug!(id, employee_id, marker, "Timesheet entry recorded");

        Ok(TimesheetEntry {
            id,
            employee_id: employee_id.to_string(),
            project_name: project_name.to_string(),
            task_description: task_description.to_string(),
            hours_worked: entry.hours_worked,
            submission_date: entry.submission_date,
            submission_time: entry.submission_time,
        })
    }

    /// All entries for `date` with the submitter's name, newest first.
    pub async fn entries_for_date(&self, date: NaiveDate) -> Result<Vec<TimesheetRow>, AppError> {
        let sql = format!(
            r#"
            SELECT {ROW_COLUMNS}
            FROM timesheet t
            JOIN employees e ON e.employee_id = t.employee_id
            WHERE t.submission_date = ?
            ORDER BY t.submission_time DESC, t.id DESC
            "#
        );

        let rows = sqlx::query_as::<_, TimesheetRow>(&sql)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// One employee's entries for `date`, oldest first.
    pub async fn entries_for_employee(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<TimesheetRow>, AppError> {
        let (_, rows) = self.employee_day(employee_id, date).await?;
        Ok(rows)
    }

    /// The employee together with their entries for `date`, oldest first.
    /// `NotFound` for an unregistered id.
    pub async fn employee_day(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<(Employee, Vec<TimesheetRow>), AppError> {
        let employee = self.get_employee(employee_id).await?;

        let sql = format!(
            r#"
            SELECT {ROW_COLUMNS}
            FROM timesheet t
            JOIN employees e ON e.employee_id = t.employee_id
            WHERE t.submission_date = ? AND t.employee_id = ?
            ORDER BY t.submission_time, t.id
            "#
        );

        let rows = sqlx::query_as::<_, TimesheetRow>(&sql)
            .bind(date)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await?;

        Ok((employee, rows))
    }

    /// Employees and the day's entries as one consistent read.
    pub async fn day_snapshot(&self, date: NaiveDate) -> Result<DaySnapshot, AppError> {
        let mut tx = self.pool.begin().await?;

        let employees = sqlx::query_as::<_, Employee>(
            "SELECT employee_id, name, password_hash FROM employees ORDER BY employee_id",
        )
        .fetch_all(&mut *tx)
        .await?;

        let sql = format!(
            r#"
            SELECT {ROW_COLUMNS}
            FROM timesheet t
            JOIN employees e ON e.employee_id = t.employee_id
            WHERE t.submission_date = ?
            ORDER BY t.submission_time DESC, t.id DESC
            "#
        );
        let rows = sqlx::query_as::<_, TimesheetRow>(&sql)
            .bind(date)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(DaySnapshot {
            date,
            employees,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_db;
    use chrono::NaiveTime;

    async fn store() -> TimesheetStore {
        let store = TimesheetStore::new(init_memory_db().await, UpdateMarker::new());
        store.init_schema().await.unwrap();
        store
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn new_entry(employee_id: &str, hours: f64, h: u32, m: u32) -> NewEntry {
        NewEntry {
            employee_id: employee_id.to_string(),
            project_name: "Apollo".to_string(),
            task_description: "Wrote the launch checklist".to_string(),
            hours_worked: hours,
            submission_date: day(),
            submission_time: NaiveTime::from_hms_opt(h, m, 0).unwrap(),
        }
    }

    #[actix_web::test]
    async fn schema_init_is_idempotent() {
        let store = store().await;
        store.init_schema().await.unwrap();
    }

    #[actix_web::test]
    async fn duplicate_registration_is_rejected_without_bump() {
        let store = store().await;
        store.register_employee("E1", "Ada", "pw").await.unwrap();
        let before = store.marker().read();

        let err = store.register_employee("E1", "Someone else", "pw2").await.unwrap_err();
        assert!(matches!(err, AppError::UniquenessViolation(id) if id == "E1"));
        assert_eq!(store.marker().read(), before);
        assert_eq!(store.get_employee("E1").await.unwrap().name, "Ada");
    }

    #[actix_web::test]
    async fn registration_validates_fields() {
        let store = store().await;
        let err = store.register_employee("  ", "Ada", "pw").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::BlankField("employee_id"))
        ));
        assert!(store.list_employees().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn padded_employee_id_is_kept_as_given() {
        let store = store().await;
        let employee = store.register_employee(" E1 ", "Ada ", "secret").await.unwrap();
        assert_eq!(employee.employee_id, " E1 ");
        assert_eq!(employee.name, "Ada ");

        assert_eq!(store.get_employee(" E1 ").await.unwrap().name, "Ada ");
        assert!(store.verify_credentials(" E1 ", "secret").await.unwrap());
        assert!(store.find_employee("E1").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn credentials_check() {
        let store = store().await;
        store.register_employee("E1", "Ada", "secret").await.unwrap();

        assert!(store.verify_credentials("E1", "secret").await.unwrap());
        assert!(!store.verify_credentials("E1", "wrong").await.unwrap());
        assert!(!store.verify_credentials("nobody", "secret").await.unwrap());
    }

    #[actix_web::test]
    async fn change_password_requires_current_one() {
        let store = store().await;
        store.register_employee("E1", "Ada", "old").await.unwrap();

        let err = store.change_password("E1", "bad", "new").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::WrongPassword)));

        store.change_password("E1", "old", "new").await.unwrap();
        assert!(store.verify_credentials("E1", "new").await.unwrap());
        assert!(!store.verify_credentials("E1", "old").await.unwrap());

        let err = store.change_password("ghost", "old", "new").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[actix_web::test]
    async fn append_round_trips_through_the_day_query() {
        let store = store().await;
        store.register_employee("E1", "Ada", "pw").await.unwrap();

        let written = store.append_entry(new_entry("E1", 3.5, 9, 5)).await.unwrap();
        let rows = store.entries_for_date(day()).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entry, written);
        assert_eq!(rows[0].employee_name, "Ada");
    }

    #[actix_web::test]
    async fn append_keeps_text_fields_verbatim() {
        let store = store().await;
        store.register_employee("E1", "Ada", "pw").await.unwrap();

        let mut entry = new_entry("E1", 1.25, 9, 0);
        entry.project_name = "  Apollo ".to_string();
        entry.task_description = "Checklist\n".to_string();
        let written = store.append_entry(entry).await.unwrap();
        assert_eq!(written.project_name, "  Apollo ");

        let rows = store.entries_for_employee("E1", day()).await.unwrap();
        assert_eq!(rows[0].entry, written);
        assert_eq!(rows[0].entry.project_name, "  Apollo ");
        assert_eq!(rows[0].entry.task_description, "Checklist\n");
    }

    #[actix_web::test]
    async fn append_strictly_advances_marker() {
        let store = store().await;
        store.register_employee("E1", "Ada", "pw").await.unwrap();

        let mut last = store.marker().read();
        for minute in 0..5 {
            store.append_entry(new_entry("E1", 1.0, 9, minute)).await.unwrap();
            let now = store.marker().read();
            assert!(now > last);
            last = now;
        }
    }

    #[actix_web::test]
    async fn invalid_entries_write_nothing() {
        let store = store().await;
        store.register_employee("E1", "Ada", "pw").await.unwrap();
        let before = store.marker().read();

        let err = store.append_entry(new_entry("E1", 0.0, 9, 0)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::NonPositiveHours(_))));

        let err = store.append_entry(new_entry("E1", -2.0, 9, 0)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::NonPositiveHours(_))));

        let err = store.append_entry(new_entry("E1", f64::NAN, 9, 0)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::NonPositiveHours(_))));

        let mut blank = new_entry("E1", 1.0, 9, 0);
        blank.project_name = "   ".to_string();
        let err = store.append_entry(blank).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::BlankField("project_name"))
        ));

        let mut blank = new_entry("E1", 1.0, 9, 0);
        blank.task_description = String::new();
        let err = store.append_entry(blank).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::BlankField("task_description"))
        ));

        let err = store.append_entry(new_entry("ghost", 1.0, 9, 0)).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::UnknownEmployee(id)) if id == "ghost"
        ));

        assert!(store.entries_for_date(day()).await.unwrap().is_empty());
        assert_eq!(store.marker().read(), before);
    }

    #[actix_web::test]
    async fn employee_scoped_query() {
        let store = store().await;
        store.register_employee("E1", "Ada", "pw").await.unwrap();
        store.register_employee("E2", "Brian", "pw").await.unwrap();

        store.append_entry(new_entry("E1", 1.0, 14, 0)).await.unwrap();
        store.append_entry(new_entry("E2", 1.0, 9, 0)).await.unwrap();
        store.append_entry(new_entry("E1", 2.0, 9, 30)).await.unwrap();

        let rows = store.entries_for_employee("E1", day()).await.unwrap();
        let times: Vec<_> = rows.iter().map(|r| r.entry.submission_time).collect();
        assert_eq!(
            times,
            vec![
                NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
                NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            ]
        );

        let err = store.entries_for_employee("ghost", day()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let (employee, rows) = store.employee_day("E2", day()).await.unwrap();
        assert_eq!(employee.name, "Brian");
        assert_eq!(rows.len(), 1);
        assert!(matches!(
            store.employee_day("ghost", day()).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[actix_web::test]
    async fn day_snapshot_only_holds_that_day() {
        let store = store().await;
        store.register_employee("E1", "Ada", "pw").await.unwrap();

        let mut yesterday = new_entry("E1", 1.0, 9, 0);
        yesterday.submission_date = day().pred_opt().unwrap();
        store.append_entry(yesterday).await.unwrap();
        store.append_entry(new_entry("E1", 2.0, 11, 0)).await.unwrap();

        let snapshot = store.day_snapshot(day()).await.unwrap();
        assert_eq!(snapshot.employees.len(), 1);
        assert_eq!(snapshot.rows.len(), 1);
        assert_eq!(snapshot.entries()[0].hours_worked, 2.0);
    }
}
