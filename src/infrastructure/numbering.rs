use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::domain::errors::DomainError;
use crate::domain::numbering::{last_sequence, DisplayNumber, NumberKind, Period};
use crate::schema::{billings, orders};

/// Next display number of `kind` for `period`.
///
/// Must run inside the transaction that inserts the numbered row: the
/// advisory lock taken here is held until that transaction ends, so two
/// writers of the same kind cannot read the same last sequence.
pub(crate) fn next_display_number(
    conn: &mut PgConnection,
    kind: NumberKind,
    period: Period,
) -> Result<DisplayNumber, DomainError> {
    diesel::sql_query("SELECT pg_advisory_xact_lock($1)")
        .bind::<BigInt, _>(kind.lock_key())
        .execute(conn)?;

    let pattern = DisplayNumber::period_pattern(kind, period);
    let issued: Vec<String> = match kind {
        NumberKind::Order => orders::table
            .filter(orders::number_display.like(pattern.as_str()))
            .select(orders::number_display)
            .load(conn)?,
        NumberKind::Billing => billings::table
            .filter(billings::number_display.like(pattern.as_str()))
            .select(billings::number_display)
            .load(conn)?,
    };

    let last = last_sequence(issued.iter().map(String::as_str), kind, period);
    Ok(DisplayNumber::following(kind, period, last))
}
