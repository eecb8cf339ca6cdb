use bookly_core::{PeriodQuery, PeriodService};
use bookly_domain::Granularity;
use uuid::Uuid;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Table, TableColumn, TableRenderer};

const USAGE: &str = "pnl <year> [monthly|yearly] [entity-id ...]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "pnl",
        "Profit and loss by month or year, optionally for selected entities",
        USAGE,
        cmd_pnl,
    )
    .with_aliases(&["report"])]
}

fn cmd_pnl(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = parse_query(args)?;
    let snapshot = context.snapshot()?;
    let buckets = PeriodService::aggregate_snapshot(snapshot, &query);
    if buckets.is_empty() {
        io::print_info("No income or expenses recorded.");
        return Ok(());
    }
    let totals = PeriodService::totals(&buckets);

    let title = match query.granularity {
        Granularity::Monthly => format!("Profit & loss {}", query.year),
        Granularity::Yearly => "Profit & loss by year".to_string(),
    };
    let title = if query.entities.is_empty() {
        title
    } else {
        format!("{} ({} entities)", title, query.entities.len())
    };

    let fmt = &context.formatters;
    let mut table = Table::new(
        Some(title),
        vec![
            TableColumn::left("Period"),
            TableColumn::right("Income"),
            TableColumn::right("Expenses"),
            TableColumn::right("Profit"),
            TableColumn::right("Margin"),
        ],
    );
    for bucket in &buckets {
        table.add_row(vec![
            bucket.period_label.clone(),
            fmt.number(bucket.income),
            fmt.number(bucket.expenses),
            fmt.number(bucket.profit),
            fmt.percent(bucket.margin_percent),
        ]);
    }
    table.set_footer(vec![
        "Total".to_string(),
        fmt.number(totals.income),
        fmt.number(totals.expenses),
        fmt.number(totals.profit),
        fmt.percent(totals.margin_percent),
    ]);
    TableRenderer::render(&table);
    Ok(())
}

fn parse_query(args: &[&str]) -> Result<PeriodQuery, CommandError> {
    let Some((year, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {}", USAGE)));
    };
    let year: i32 = year
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid year `{}`", year)))?;

    let (granularity, ids) = match rest.split_first() {
        Some((first, ids)) => match Granularity::from_label(first) {
            Some(granularity) => (granularity, ids),
            None => (Granularity::Monthly, rest),
        },
        None => (Granularity::Monthly, rest),
    };

    let entities = ids
        .iter()
        .map(|raw| {
            Uuid::parse_str(raw).map_err(|_| {
                CommandError::InvalidArguments(format!("invalid entity id `{}`", raw))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let query = match granularity {
        Granularity::Monthly => PeriodQuery::monthly(year),
        Granularity::Yearly => PeriodQuery::yearly(year),
    };
    Ok(query.with_entities(entities))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_monthly_without_filter() {
        let query = parse_query(&["2024"]).unwrap();
        assert_eq!(query.granularity, Granularity::Monthly);
        assert_eq!(query.year, 2024);
        assert!(query.entities.is_empty());
    }

    #[test]
    fn entity_ids_may_follow_year_directly() {
        let id = Uuid::new_v4();
        let raw = id.to_string();
        let query = parse_query(&["2024", raw.as_str()]).unwrap();
        assert_eq!(query.granularity, Granularity::Monthly);
        assert!(query.entities.contains(&id));

        let query = parse_query(&["2024", "yearly", raw.as_str()]).unwrap();
        assert_eq!(query.granularity, Granularity::Yearly);
        assert_eq!(query.entities.len(), 1);
    }

    #[test]
    fn rejects_bad_year_and_ids() {
        assert!(parse_query(&[]).is_err());
        assert!(parse_query(&["twenty"]).is_err());
        assert!(parse_query(&["2024", "monthly", "not-a-uuid"]).is_err());
    }
}
