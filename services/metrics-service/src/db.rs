use chrono::{NaiveDateTime, Timelike, Utc};
use tokio_postgres::{types::ToSql, NoTls};

use crate::config::DbConfig;
use crate::errors::IngestError;
use crate::models::TelemetryEvent;

/// Column order is load-bearing; the INSERT binds values positionally.
const METRIC_COLUMNS: [&str; 11] = [
    "created",
    "pageId",
    "hostname",
    "clicks",
    "mouseleaves",
    "mousemoveHalts",
    "mousemovePixels",
    "resizeHalts",
    "resizePixels",
    "scrollHalts",
    "scrollPixels",
];

pub fn insert_sql(table: &str) -> String {
    // Mixed-case identifiers must stay quoted or Postgres folds them to
    // lowercase. The table name comes from trusted configuration; every
    // value travels as a bind parameter.
    let columns = METRIC_COLUMNS
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=METRIC_COLUMNS.len())
        .map(|n| format!("${n}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO \"{table}\" ({columns}) VALUES ({placeholders})")
}

/// Counter values for one row, in column order after `created`, `pageId`,
/// `hostname`. Halts come from state-change counts, pixels from raw fire
/// counts.
pub fn counter_values(event: &TelemetryEvent) -> [i32; 8] {
    let summaries = &event.ux_metrics.summaries;
    [
        summaries.click.fire_count,
        summaries.mouseleave.fire_count,
        summaries.mousemove.state_change_count,
        summaries.mousemove.fire_count,
        summaries.resize.state_change_count,
        summaries.resize.fire_count,
        summaries.scroll.state_change_count,
        summaries.scroll.fire_count,
    ]
}

/// Row timestamp: UTC, truncated to whole seconds.
pub fn created_timestamp() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Opens a connection, inserts one summary row, and returns rows affected.
///
/// Each call gets its own connection, bounded by the configured connect
/// timeout; establishment failures surface immediately and are not retried.
/// The statement runs autocommitted, and dropping the client closes the
/// connection on every exit path.
pub async fn insert_summary(config: &DbConfig, event: &TelemetryEvent) -> Result<u64, IngestError> {
    let mut pg = tokio_postgres::Config::new();
    pg.host(&config.host)
        .port(config.port)
        .user(&config.user)
        .password(&config.password)
        .dbname(&config.dbname)
        .connect_timeout(config.connect_timeout);

    let (client, connection) = pg.connect(NoTls).await.map_err(|err| {
        tracing::error!(
            host = config.host.as_str(),
            dbname = config.dbname.as_str(),
            error = %err,
            "could not connect to metrics store"
        );
        IngestError::Connection(err.to_string())
    })?;
    tokio::spawn(async move {
        // Drive the connection in the background; it ends when the client drops.
        if let Err(err) = connection.await {
            tracing::error!(error = %err, "database connection error");
        }
    });

    let sql = insert_sql(&config.table);
    let created = created_timestamp();
    let counters = counter_values(event);
    let params: [&(dyn ToSql + Sync); 11] = [
        &created,
        &event.page,
        &event.host,
        &counters[0],
        &counters[1],
        &counters[2],
        &counters[3],
        &counters[4],
        &counters[5],
        &counters[6],
        &counters[7],
    ];

    match client.execute(sql.as_str(), &params).await {
        Ok(count) => Ok(count),
        Err(err) => Err(classify_insert_error(err)),
    }
}

fn classify_insert_error(err: tokio_postgres::Error) -> IngestError {
    // SQLSTATE class 23 covers integrity constraint violations.
    match err.code() {
        Some(state) if state.code().starts_with("23") => IngestError::Insertion(err.to_string()),
        _ => IngestError::Unexpected(err.to_string()),
    }
}
