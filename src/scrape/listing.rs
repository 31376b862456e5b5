use anyhow::{anyhow, Context, Result};
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use super::cache::PageCache;
use super::html::{cell_text, next_tag_block_ci, slice_between_ci};
use crate::config::SourceConfig;
use crate::valuation::RawDomainRecord;

/// Column roles a listing table can carry. Headers vary per site, so the
/// header row is matched against known aliases; tables without a recognizable
/// header fall back to the conventional column order.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    Domain,
    Age,
    Backlinks,
    Authority,
    Traffic,
    Wayback,
    Ignored,
}

fn classify_header(header: &str) -> Column {
    let h = header.to_ascii_lowercase();
    if h.contains("domain") || h.contains("name") {
        Column::Domain
    } else if h.contains("age") || h.contains("birth") || h.contains("year") {
        Column::Age
    } else if h.contains("backlink") || h == "bl" {
        Column::Backlinks
    } else if h.contains("authority") || h == "da" {
        Column::Authority
    } else if h.contains("traffic") || h.contains("visit") {
        Column::Traffic
    } else if h.contains("wayback") || h.contains("archive") || h == "wby" {
        Column::Wayback
    } else {
        Column::Ignored
    }
}

const DEFAULT_LAYOUT: [Column; 6] = [
    Column::Domain,
    Column::Age,
    Column::Backlinks,
    Column::Authority,
    Column::Traffic,
    Column::Wayback,
];

/// Parse a whole-number count out of a listing cell. Cells carry commas,
/// units and placeholder dashes; anything unparseable degrades to 0.
fn parse_count(cell: &str) -> u64 {
    let cleaned = cell.replace(',', "");
    let digits: String = cleaned
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Extract the cell texts of every `<td>` in a row block.
fn row_cells(row: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut pos = 0;
    while let Some((start, end)) = next_tag_block_ci(row, "<td", "</td>", pos) {
        cells.push(cell_text(&row[start..end]));
        pos = end;
    }
    cells
}

/// Read the header row (`<th>` cells) into a column layout, if there is one.
fn header_layout(table: &str) -> Option<Vec<Column>> {
    let (start, end) = next_tag_block_ci(table, "<tr", "</tr>", 0)?;
    let row = &table[start..end];

    let mut layout = Vec::new();
    let mut pos = 0;
    while let Some((s, e)) = next_tag_block_ci(row, "<th", "</th>", pos) {
        layout.push(classify_header(&cell_text(&row[s..e])));
        pos = e;
    }

    if layout.iter().any(|c| *c == Column::Domain) {
        Some(layout)
    } else {
        None
    }
}

/// Parse a listing page into raw records.
///
/// Looks for the first `<table>` on the page, maps its columns via the
/// header row (falling back to the conventional order), and turns each data
/// row into a RawDomainRecord. Rows without a domain cell are skipped;
/// malformed numeric cells become 0.
pub fn parse_listing(page: &str) -> Vec<RawDomainRecord> {
    let table = match slice_between_ci(page, "<table", "</table>") {
        Some(t) => t,
        None => return Vec::new(),
    };

    let layout = header_layout(table).unwrap_or_else(|| DEFAULT_LAYOUT.to_vec());

    let mut records = Vec::new();
    let mut pos = 0;
    while let Some((start, end)) = next_tag_block_ci(table, "<tr", "</tr>", pos) {
        let row = &table[start..end];
        pos = end;

        let cells = row_cells(row);
        if cells.is_empty() {
            continue; // header row or spacer
        }

        let mut record = RawDomainRecord::new("");
        for (cell, column) in cells.iter().zip(layout.iter()) {
            match column {
                Column::Domain => record.domain = cell.trim().to_string(),
                Column::Age => record.age = parse_count(cell) as u32,
                Column::Backlinks => record.backlinks = parse_count(cell),
                Column::Authority => record.domain_authority = parse_count(cell) as i64,
                Column::Traffic => record.traffic = parse_count(cell),
                Column::Wayback => record.wayback_snapshots = parse_count(cell),
                Column::Ignored => {}
            }
        }

        if !record.domain.is_empty() {
            records.push(record);
        }
    }

    records
}

/// Fetch one page with exponential backoff: 3 attempts, 100ms base delay.
async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    let retry_strategy = ExponentialBackoff::from_millis(100)
        .max_delay(std::time::Duration::from_secs(5))
        .take(3);

    Retry::spawn(retry_strategy, || async {
        let response = client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(anyhow!(
                "Listing site rejected the session ({}). Your session cookie may have expired.",
                status
            ));
        }
        if !status.is_success() {
            return Err(anyhow!("Listing page {} returned {}", url, status));
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read body from {}", url))
    })
    .await
}

/// Scrape one configured source into raw records, going through the page
/// cache when one is supplied.
pub async fn scrape_source(
    client: &reqwest::Client,
    source: &SourceConfig,
    cache: Option<&PageCache>,
) -> Result<Vec<RawDomainRecord>> {
    if let Some(cache) = cache {
        if let Some(body) = cache.get(&source.url) {
            return Ok(parse_listing(&body));
        }
    }

    let body = fetch_page(client, &source.url).await?;

    if let Some(cache) = cache {
        if let Err(e) = cache.put(&source.url, &body) {
            eprintln!("Warning: {}", e);
        }
    }

    Ok(parse_listing(&body))
}
