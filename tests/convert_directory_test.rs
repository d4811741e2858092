//! End-to-end tests for converting a directory of detection files.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use whistle_raven::Error;
use whistle_raven::config::ErrorPolicy;
use whistle_raven::convert::{ConvertOptions, FileStatus, convert_csv, convert_directory};

fn options() -> ConvertOptions {
    ConvertOptions {
        output_dir: None,
        on_error: ErrorPolicy::Abort,
        progress: false,
    }
}

fn table_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".Table1.selection.txt"))
        .collect();
    names.sort();
    names
}

fn data_lines(path: &Path) -> Vec<Vec<String>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .skip(1)
        .map(|l| l.split('\t').map(str::to_string).collect())
        .collect()
}

#[test]
fn test_whistle_all_scenario() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("whistle_all_test.csv"),
        "filename,time_offset,confidence\n\
         a.wav,0.0,0.9\n\
         a.wav,2.5,0.7\n\
         b.wav,1.25,0.5\n",
    )
    .unwrap();

    let summary = convert_directory(dir.path(), &options()).unwrap();
    assert_eq!(summary.converted(), 1);
    assert_eq!(summary.tables(), 2);
    assert_eq!(summary.selections(), 3);

    assert_eq!(
        table_names(dir.path()),
        [
            "whistle_all_a.wav.Table1.selection.txt",
            "whistle_all_b.wav.Table1.selection.txt"
        ]
    );

    let a = data_lines(&dir.path().join("whistle_all_a.wav.Table1.selection.txt"));
    assert_eq!(a.len(), 2);
    assert_eq!(a[0][0], "1");
    assert_eq!(a[0][3], "0.000000");
    assert_eq!(a[0][8], "0.9");
    assert_eq!(a[1][0], "2");
    assert_eq!(a[1][3], "2.500000");
    assert_eq!(a[1][4], "3.500000");

    let b = data_lines(&dir.path().join("whistle_all_b.wav.Table1.selection.txt"));
    assert_eq!(b.len(), 1);
    assert_eq!(b[0][0], "1");
    assert_eq!(b[0][3], "1.250000");
    assert_eq!(b[0][7], "b.wav");
}

#[test]
fn test_naming_conventions() {
    let dir = TempDir::new().unwrap();
    let row = "filename,time_offset,confidence\nrec01.wav,1.0,0.8\n";
    fs::write(dir.path().join("whistle_detections_2023.csv"), row).unwrap();
    fs::write(dir.path().join("mydata.csv"), row).unwrap();

    convert_directory(dir.path(), &options()).unwrap();

    assert_eq!(
        table_names(dir.path()),
        [
            "mydata_rec01.wav.Table1.selection.txt",
            "whistle_detections_rec01.wav.Table1.selection.txt"
        ]
    );
}

#[test]
fn test_output_dir_override() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(
        input.path().join("run.csv"),
        "filename,time_offset,confidence\nrec.wav,4.0,0.6\n",
    )
    .unwrap();

    let options = ConvertOptions {
        output_dir: Some(output.path().to_path_buf()),
        ..options()
    };
    let summary = convert_directory(input.path(), &options).unwrap();

    assert_eq!(summary.output_dir, output.path());
    assert!(table_names(input.path()).is_empty());
    assert_eq!(table_names(output.path()), ["run_rec.wav.Table1.selection.txt"]);
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("whistle_all_x.csv"),
        "filename,time_offset,confidence\n\
         a.wav,0.1,0.91\n\
         b.wav,7.333,0.42\n\
         a.wav,9.75,0.66\n",
    )
    .unwrap();

    convert_directory(dir.path(), &options()).unwrap();
    let first: Vec<Vec<u8>> = table_names(dir.path())
        .iter()
        .map(|n| fs::read(dir.path().join(n)).unwrap())
        .collect();

    convert_directory(dir.path(), &options()).unwrap();
    let second: Vec<Vec<u8>> = table_names(dir.path())
        .iter()
        .map(|n| fs::read(dir.path().join(n)).unwrap())
        .collect();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn test_header_only_csv_is_skipped() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("empty.csv"),
        "filename,time_offset,confidence\n",
    )
    .unwrap();

    let summary = convert_directory(dir.path(), &options()).unwrap();
    assert_eq!(summary.skipped(), 1);
    assert_eq!(summary.files[0].status, FileStatus::Skipped);
    assert!(table_names(dir.path()).is_empty());
}

#[test]
fn test_no_csv_files_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    let summary = convert_directory(dir.path(), &options()).unwrap();
    assert!(summary.files.is_empty());
}

#[test]
fn test_not_a_directory() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("file.csv");
    fs::write(&file, "filename,time_offset,confidence\n").unwrap();

    let result = convert_directory(&file, &options());
    assert!(matches!(result, Err(Error::InvalidInputDirectory { .. })));
}

#[test]
fn test_abort_policy_stops_at_first_failure() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a_bad.csv"), "filename,confidence\nx.wav,0.5\n").unwrap();
    fs::write(
        dir.path().join("b_good.csv"),
        "filename,time_offset,confidence\ny.wav,1.0,0.5\n",
    )
    .unwrap();

    let result = convert_directory(dir.path(), &options());
    assert!(matches!(result, Err(Error::MissingColumn { .. })));
    assert!(table_names(dir.path()).is_empty());
}

#[test]
fn test_skip_policy_continues_after_failure() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a_bad.csv"), "filename,confidence\nx.wav,0.5\n").unwrap();
    fs::write(
        dir.path().join("b_good.csv"),
        "filename,time_offset,confidence\ny.wav,1.0,0.5\n",
    )
    .unwrap();

    let options = ConvertOptions {
        on_error: ErrorPolicy::Skip,
        ..options()
    };
    let summary = convert_directory(dir.path(), &options).unwrap();

    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.converted(), 1);
    assert!(summary.files[0].error.as_deref().unwrap().contains("time_offset"));
    assert_eq!(
        table_names(dir.path()),
        ["b_good_y.wav.Table1.selection.txt"]
    );
}

#[test]
fn test_convert_csv_reports_selections() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("session.csv");
    fs::write(
        &csv,
        "time_offset,filename,confidence,extra\n\
         5,c.wav,0.1,x\n\
         6,c.wav,0.2,y\n\
         7,c.wav,0.3,z\n",
    )
    .unwrap();

    let conversion = convert_csv(&csv, dir.path()).unwrap();
    assert_eq!(conversion.prefix, "session_");
    assert_eq!(conversion.tables.len(), 1);
    assert_eq!(conversion.tables[0].selections, 3);
    assert_eq!(conversion.selections(), 3);
    assert_eq!(
        conversion.tables[0].output_file,
        dir.path().join("session_c.wav.Table1.selection.txt")
    );
}
