//! gridq - query a JSON array of records the way an admin table would.
//!
//! Reads a file containing a JSON array of objects and runs one gridline
//! query against it from CLI flags, printing the requested page as aligned
//! columns plus a pager footer. This plays the role of the "view layer"
//! caller: it owns record loading and rendering, while gridline owns
//! matching, ordering, and slicing.
//!
//! ```text
//! gridq --data disputes.json \
//!     --search sarah --search-field buyer.name --search-field seller.name \
//!     --filter status=open \
//!     --sort priority --desc --sort-type enum \
//!     --rank urgent=3 --rank high=2 --rank medium=1 --rank normal=0 \
//!     --page 1 --page-size 20 \
//!     --column id --column buyer.name --column priority
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use gridline::{FieldPath, ListQuery, Queryable, SortSpec};
use serde_json::Value as Json;

#[derive(Parser)]
#[command(name = "gridq", about = "Filter, sort, and paginate a JSON array of records")]
struct Args {
    /// JSON file containing an array of objects
    #[arg(long)]
    data: PathBuf,

    /// Free-text search term
    #[arg(long, default_value = "")]
    search: String,

    /// Field scanned by --search (repeatable, dotted paths allowed)
    #[arg(long = "search-field")]
    search_fields: Vec<String>,

    /// Facet filter as field=value; the value "all" is a no-op (repeatable)
    #[arg(long = "filter")]
    filters: Vec<String>,

    /// Field to sort by
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    desc: bool,

    /// How sort values compare
    #[arg(long = "sort-type", value_enum, default_value_t = SortType::String)]
    sort_type: SortType,

    /// Rank table entry for --sort-type enum, as value=rank (repeatable)
    #[arg(long = "rank")]
    ranks: Vec<String>,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Records per page
    #[arg(long = "page-size", default_value_t = 20)]
    page_size: usize,

    /// Column to print (repeatable); defaults to every top-level key of
    /// the first record
    #[arg(long = "column")]
    columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortType {
    String,
    Number,
    Date,
    Enum,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.data)
        .with_context(|| format!("reading {}", args.data.display()))?;
    let records: Vec<Json> = serde_json::from_str::<Json>(&raw)
        .context("data file is not valid JSON")?
        .as_array()
        .context("data file must contain a JSON array of objects")?
        .clone();

    let query = build_query(&args)?;
    let result = query.run(&records);

    let columns = if args.columns.is_empty() {
        default_columns(&records)
    } else {
        args.columns.clone()
    };
    print_table(&result.items, &columns);

    let shown = result.items.len();
    if shown == 0 {
        println!("No records (page {} of {}, {} matched)",
            args.page, result.total_pages, result.total_matched);
    } else {
        let first = (args.page - 1) * args.page_size + 1;
        let last = first + shown - 1;
        println!(
            "Showing {first}-{last} of {} (page {} of {})",
            result.total_matched, args.page, result.total_pages
        );
    }
    Ok(())
}

fn build_query(args: &Args) -> Result<ListQuery> {
    let mut query = ListQuery::new();

    if !args.search.is_empty() {
        if args.search_fields.is_empty() {
            bail!("--search requires at least one --search-field");
        }
        query = query.search(&args.search, args.search_fields.iter().map(String::as_str));
    }

    for raw in &args.filters {
        let (field, value) = split_pair(raw, "--filter")?;
        query = query.facet(field, value);
    }

    if let Some(field) = &args.sort {
        let spec = if args.desc {
            SortSpec::desc(field.as_str())
        } else {
            SortSpec::asc(field.as_str())
        };
        let spec = match args.sort_type {
            SortType::String => spec,
            SortType::Number => spec.numeric(),
            SortType::Date => spec.date(),
            SortType::Enum => spec.ranked(parse_ranks(&args.ranks)?),
        };
        query = query.sort(spec);
    }

    Ok(query.page(args.page, args.page_size)?.build())
}

fn split_pair<'a>(raw: &'a str, flag: &str) -> Result<(&'a str, &'a str)> {
    raw.split_once('=')
        .with_context(|| format!("{flag} expects field=value, got {raw:?}"))
}

fn parse_ranks(ranks: &[String]) -> Result<Vec<(String, i64)>> {
    if ranks.is_empty() {
        bail!("--sort-type enum requires at least one --rank value=rank");
    }
    ranks
        .iter()
        .map(|raw| {
            let (value, rank) = split_pair(raw, "--rank")?;
            let rank: i64 = rank
                .parse()
                .with_context(|| format!("--rank {raw:?}: rank is not an integer"))?;
            Ok((value.to_string(), rank))
        })
        .collect()
}

fn default_columns(records: &[Json]) -> Vec<String> {
    records
        .first()
        .and_then(Json::as_object)
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default()
}

fn print_table(items: &[&Json], columns: &[String]) {
    let paths: Vec<FieldPath> = columns.iter().map(FieldPath::new).collect();

    let mut widths: Vec<usize> = columns.iter().map(String::len).collect();
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|record| {
            paths
                .iter()
                .enumerate()
                .map(|(i, path)| {
                    let cell = record
                        .field_value(path)
                        .as_text()
                        .map(|t| t.into_owned())
                        .unwrap_or_else(|| "-".to_string());
                    widths[i] = widths[i].max(cell.len());
                    cell
                })
                .collect()
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{name:<width$}", width = widths[i]))
        .collect();
    println!("{}", header.join("  "));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{cell:<width$}", width = widths[i]))
            .collect();
        println!("{}", line.join("  "));
    }
}
