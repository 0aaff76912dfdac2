use std::fs;
use std::path::Path;

use graysplit::config::{RoundingName, SplitName, WeightsName};
use graysplit::{report, Config, Error, Image};
use graysplit_texel::{PixelBuffer, Rgb};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config_in(dir: &Path) -> Config {
    Config {
        generated: dir.join("generated.bmp"),
        output: dir.join("processed.bmp"),
        report: dir.join("performance_data.txt"),
        width: 64,
        height: 48,
        workers: Some(3),
        ..Config::default()
    }
}

fn assert_gray(image: &Image) {
    match image {
        Image::Bitmap(image) => assert!(image.as_slice().iter().all(|px| px.r == px.g && px.g == px.b)),
        Image::Rgb(image) => assert!(image.as_slice().iter().all(|px| px.is_gray())),
    }
}

#[test]
fn generated_gradient() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let comparison = graysplit::run(&config).unwrap();
    assert_eq!(comparison.workers, 3);

    let generated = Image::open(&config.generated).unwrap();
    assert_eq!((generated.width(), generated.height()), (64, 48));

    let processed = Image::open(&config.output).unwrap();
    assert!(matches!(processed, Image::Bitmap(_)));
    assert_eq!((processed.width(), processed.height()), (64, 48));
    assert_gray(&processed);

    let report = fs::read_to_string(&config.report).unwrap();
    let lines: Vec<_> = report.lines().map(|line| report::parse_line(line).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].0, "Without Threads");
    assert_eq!(lines[1].0, "With Threads");
    assert!(lines.iter().all(|(_, millis)| *millis >= 0.0));
}

#[test]
fn output_matches_sequential_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        weights: WeightsName::Legacy,
        rounding: RoundingName::Truncate,
        split: SplitName::Rows,
        ..config_in(dir.path())
    };

    graysplit::run(&config).unwrap();

    let mut expected = Image::open(&config.generated).unwrap();
    expected.grayscale_sequential(config.luma());
    assert_eq!(Image::open(&config.output).unwrap(), expected);
}

#[test]
fn png_input_and_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.png");

    let pixels = vec![
        Rgb::new(255, 0, 0),
        Rgb::new(0, 255, 0),
        Rgb::new(0, 0, 255),
        Rgb::WHITE,
    ];
    Image::from(PixelBuffer::from_pixels(2, 2, pixels).unwrap())
        .save(&input)
        .unwrap();

    let config = Config {
        input: Some(input),
        output: dir.path().join("processed.png"),
        workers: Some(2),
        ..config_in(dir.path())
    };
    graysplit::run(&config).unwrap();

    match Image::open(&config.output).unwrap() {
        Image::Rgb(image) => {
            let grays: Vec<u8> = image.as_slice().iter().map(|px| px.r).collect();
            assert_eq!(grays, [76, 150, 29, 255]);
        }
        other => panic!("expected an rgb image, got {:?}", other),
    }

    // No gradient is generated when an input is given.
    assert!(!config.generated.exists());
}

#[test]
fn config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graysplit.json");
    fs::write(&path, r#"{ "width": 10, "workers": 2, "split": "rows" }"#).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.width, 10);
    assert_eq!(config.height, 256);
    assert_eq!(config.workers, Some(2));
    assert_eq!(config.split, SplitName::Rows);

    fs::write(&path, "{ width: 10 }").unwrap();
    assert!(matches!(Config::load(&path), Err(Error::Config { .. })));
}

#[test]
fn missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        input: Some(dir.path().join("missing.bmp")),
        ..config_in(dir.path())
    };

    assert!(matches!(graysplit::run(&config), Err(Error::Bitmap { .. })));
    assert!(!config.report.exists());
}

#[test]
fn zero_workers_fail() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        workers: Some(0),
        ..config_in(dir.path())
    };

    assert!(matches!(graysplit::run(&config), Err(Error::Execute(_))));
    assert!(!config.output.exists());
}
