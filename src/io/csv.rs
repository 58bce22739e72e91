use crate::config::{ChannelSpec, ColumnConfig};
use crate::error::{GvfError, GvfResult};
use crate::io::results::RunSummary;
use crate::routing::{Boundary, RunOutcome, Scenario};
use csv::{ReaderBuilder, StringRecord, Writer, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

// Column positions resolved from the scenario header
struct ScenarioColumns {
    q: usize,
    n: usize,
    s0: usize,
    b: usize,
    m: usize,
    y0: usize,
    length: usize,
    x0: Option<usize>,
}

impl ScenarioColumns {
    fn from_headers(headers: &StringRecord, cols: &ColumnConfig) -> GvfResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| GvfError::Scenario {
                line: 1,
                what: format!("missing column '{name}'"),
            })
        };

        Ok(ScenarioColumns {
            q: require(&cols.discharge)?,
            n: require(&cols.n)?,
            s0: require(&cols.s0)?,
            b: require(&cols.b)?,
            m: require(&cols.m)?,
            y0: require(&cols.y0)?,
            length: require(&cols.length)?,
            x0: find(&cols.x0),
        })
    }
}

fn parse_field(record: &StringRecord, idx: usize, line: usize) -> GvfResult<f64> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse::<f64>().map_err(|_| GvfError::Scenario {
        line,
        what: format!("'{raw}' is not a number"),
    })
}

// Read channel scenarios; x0 defaults to 0 when the column is absent or blank
pub fn load_scenarios<R: Read>(reader: R, cols: &ColumnConfig) -> GvfResult<Vec<Scenario>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ScenarioColumns::from_headers(rdr.headers()?, cols)?;
    let mut scenarios = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let line = i + 2;
        let field = |idx| parse_field(&record, idx, line);

        let channel = ChannelSpec::new(
            field(columns.q)?,
            field(columns.n)?,
            field(columns.s0)?,
            field(columns.b)?,
            field(columns.m)?,
        )
        .map_err(|e| GvfError::Scenario {
            line,
            what: e.to_string(),
        })?;

        let x0 = match columns.x0 {
            Some(idx) if !record.get(idx).unwrap_or("").is_empty() => field(idx)?,
            _ => 0.0,
        };

        scenarios.push(Scenario {
            id: i,
            channel,
            boundary: Boundary {
                x0,
                y0: field(columns.y0)?,
                length: field(columns.length)?,
            },
        });
    }

    Ok(scenarios)
}

pub fn load_scenarios_from_path(path: &Path, cols: &ColumnConfig) -> GvfResult<Vec<Scenario>> {
    let scenarios = load_scenarios(File::open(path)?, cols)?;
    info!("Loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

// Create CSV writer at a path
pub fn create_csv_writer(path: &Path) -> GvfResult<Writer<File>> {
    Ok(WriterBuilder::new().has_headers(true).from_path(path)?)
}

// Profile rows with the reference depths repeated for plotting
pub fn write_profile<W: Write>(wtr: &mut Writer<W>, outcome: &RunOutcome) -> GvfResult<()> {
    wtr.write_record(["x", "y", "yn", "yc"])?;

    let yn = outcome
        .refs
        .yn()
        .map(|v| v.to_string())
        .unwrap_or_default();
    let yc = outcome.refs.yc().to_string();

    for p in &outcome.profile.points {
        wtr.write_record([p.x.to_string(), p.y.to_string(), yn.clone(), yc.clone()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_summaries<W: Write>(wtr: &mut Writer<W>, rows: &[RunSummary]) -> GvfResult<()> {
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
