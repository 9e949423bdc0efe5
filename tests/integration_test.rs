use gridstats::errors::{GridStatsError, Result};
use gridstats::grid::DType;
use gridstats::report::{write_json, ColumnSummary, ReductionReport};
use gridstats::statistics::{reduce, reduce_all, AxisSelector, NanPolicy, Reducer, StatOperation};
use gridstats::table::{Table, TableOptions};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::tempdir;

const HEIGHTS: [u32; 44] = [
    189, 170, 189, 163, 183, 171, 185, 168, 173, 183, 173, 173, 175, 178, 183, 193, 178, 173, 174,
    183, 183, 168, 170, 178, 182, 180, 183, 178, 182, 188, 175, 179, 183, 193, 182, 183, 177, 185,
    188, 188, 182, 185, 191, 182,
];

fn write_heights_csv(path: &Path) {
    let mut contents = String::from("order,name,height(cm)\n");
    for (i, height) in HEIGHTS.iter().enumerate() {
        contents.push_str(&format!("{},President {},{}\n", i + 1, i + 1, height));
    }
    fs::write(path, contents).expect("Failed to write CSV file");
}

#[test]
fn test_heights_csv_end_to_end() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("president_heights.csv");
    write_heights_csv(&file_path);

    let table = Table::from_path(&file_path, TableOptions::default())?;
    assert_eq!(table.column_names(), vec!["order", "name", "height(cm)"]);
    assert_eq!(table.num_rows(), 44);

    let heights = table.column("height(cm)")?;
    assert_eq!(heights.shape(), &[44]);
    assert_eq!(heights.dtype(), DType::Integer);

    let mean = reduce_all(&heights, StatOperation::Mean)?;
    assert!((mean - 180.0455).abs() < 1e-4);
    let std = reduce_all(&heights, StatOperation::Std)?;
    assert!((std - 6.9836).abs() < 1e-4);
    assert_eq!(reduce_all(&heights, StatOperation::Min)?, 163.0);
    assert_eq!(reduce_all(&heights, StatOperation::Max)?, 193.0);
    assert_eq!(reduce_all(&heights, StatOperation::Median)?, 182.0);

    let summary = ColumnSummary::compute(&heights, NanPolicy::Propagate)?;
    assert_eq!(summary.count, 44);
    assert_eq!(summary.p75, 183.5);

    Ok(())
}

#[test]
fn test_column_errors() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("president_heights.csv");
    write_heights_csv(&file_path);

    let table = Table::from_path(&file_path, TableOptions::default())?;

    match table.column("weight") {
        Err(GridStatsError::ColumnNotFound { column }) => assert_eq!(column, "weight"),
        other => panic!("Expected ColumnNotFound error, got {other:?}"),
    }

    match table.column("name") {
        Err(GridStatsError::NonNumericColumn { column, .. }) => assert_eq!(column, "name"),
        other => panic!("Expected NonNumericColumn error, got {other:?}"),
    }

    let missing = Table::from_path(temp_dir.path().join("missing.csv"), TableOptions::default());
    assert!(matches!(missing, Err(GridStatsError::Io(_))));

    Ok(())
}

#[test]
fn test_numeric_grid_axis_reductions() -> Result<()> {
    let csv = "a,b,c,d,label\n1,1,1,0,x\n3,4,7,2,y\n0,5,3,8,z\n";
    let table = Table::from_reader(Cursor::new(csv), TableOptions::default())?;

    let grid = table.numeric_grid()?;
    assert_eq!(grid.shape(), &[3, 4]);
    assert_eq!(grid.dtype(), DType::Integer);

    assert_eq!(reduce_all(&grid, StatOperation::Sum)?, 35.0);

    let min_cols = reduce(&grid, StatOperation::Min, AxisSelector::Axis(0))?;
    assert_eq!(min_cols.to_vec(), vec![0.0, 1.0, 1.0, 0.0]);

    let max_rows = reduce(&grid, StatOperation::Max, AxisSelector::Axis(1))?;
    assert_eq!(max_rows.to_vec(), vec![1.0, 7.0, 8.0]);

    assert!(matches!(
        reduce(&grid, StatOperation::Max, AxisSelector::Axis(2)),
        Err(GridStatsError::InvalidAxis { axis: 2, ndim: 2 })
    ));

    Ok(())
}

#[test]
fn test_headerless_and_delimited_input() -> Result<()> {
    let csv = "1.5;2\n2.5;4\n";
    let options = TableOptions {
        has_header: false,
        delimiter: b';',
    };
    let table = Table::from_reader(Cursor::new(csv), options)?;
    assert_eq!(table.num_rows(), 2);

    let grid = table.numeric_grid()?;
    assert_eq!(grid.shape(), &[2, 2]);
    assert_eq!(grid.dtype(), DType::Float);
    assert_eq!(grid.to_vec(), vec![1.5, 2.0, 2.5, 4.0]);

    let first = table.column(table.column_names()[0])?;
    assert_eq!(reduce_all(&first, StatOperation::Sum)?, 4.0);

    Ok(())
}

#[test]
fn test_empty_cells_become_nan() -> Result<()> {
    let csv = "height,weight\n170,\n190,80\n";
    let table = Table::from_reader(Cursor::new(csv), TableOptions::default())?;
    let weights = table.column("weight")?;

    assert_eq!(weights.dtype(), DType::Float);
    assert!(reduce_all(&weights, StatOperation::Mean)?.is_nan());
    let skip = Reducer::new(NanPolicy::Skip);
    assert_eq!(skip.reduce_all(&weights, StatOperation::Mean)?, 80.0);

    Ok(())
}

#[test]
fn test_json_report_written() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let csv_path = temp_dir.path().join("president_heights.csv");
    let json_path = temp_dir.path().join("results.json");
    write_heights_csv(&csv_path);

    let table = Table::from_path(&csv_path, TableOptions::default())?;
    let heights = table.column("height(cm)")?;

    let reports: Vec<ReductionReport> = [StatOperation::Max, StatOperation::Percentile(90.0)]
        .into_iter()
        .map(|operation| -> Result<ReductionReport> {
            let result = reduce(&heights, operation, AxisSelector::All)?;
            Ok(
                ReductionReport::new(operation, AxisSelector::All, heights.dtype(), &result)
                    .with_source(csv_path.display().to_string(), Some("height(cm)")),
            )
        })
        .collect::<Result<_>>()?;

    write_json(&reports, &json_path)?;

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path)?)?;
    let entries = written.as_array().expect("report is a JSON array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["operation"], "maximum");
    assert_eq!(entries[0]["dtype"], "integer");
    assert_eq!(entries[0]["values"][0], 193.0);
    assert_eq!(entries[0]["column"], "height(cm)");
    assert!(entries[0]["axis"].is_null());
    assert_eq!(entries[1]["operation"], "percentile(90)");
    assert_eq!(entries[1]["dtype"], "float");
    assert!((entries[1]["values"][0].as_f64().unwrap_or_default() - 188.7).abs() < 1e-9);

    Ok(())
}
