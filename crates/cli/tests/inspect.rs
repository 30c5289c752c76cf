use async_trait::async_trait;
use inspectarr::cli::OutputFormat;
use inspectarr::inspect;
use inspectarr::output::{OutputOptions, Printer};
use inspectarr_arr::models::{Movie, QualityProfile};
use inspectarr_arr::{ArrError, Radarr, RadarrApi};
use serde_json::json;

struct FakeRadarr;

#[async_trait]
impl RadarrApi for FakeRadarr {
    async fn movies(&self) -> Result<Vec<Movie>, ArrError> {
        Ok(serde_json::from_value(json!([
            {
                "title": "Arrival",
                "year": 2016,
                "monitored": true,
                "hasFile": true,
                "movieFile": {
                    "size": 4000000000u64,
                    "releaseGroup": "NTb",
                    "mediaInfo": { "resolution": "3840x2160", "videoCodec": "x265" }
                }
            },
            {
                "title": "Heat",
                "year": 1995,
                "monitored": false,
                "hasFile": true,
                "movieFile": {
                    "size": 2500000000u64,
                    "releaseGroup": "FraMeSToR",
                    "mediaInfo": { "resolution": "1920x1080", "videoCodec": "x264" }
                }
            },
            { "title": "Wanted", "year": 2030, "monitored": true, "hasFile": false }
        ]))
        .unwrap())
    }

    async fn quality_profiles(&self) -> Result<Vec<QualityProfile>, ArrError> {
        Ok(Vec::new())
    }
}

async fn run(query: &str, format: OutputFormat) -> anyhow::Result<String> {
    let options = OutputOptions {
        format,
        quiet: format == OutputFormat::Json,
        ..Default::default()
    };
    let mut printer = Printer::new(Vec::new(), options);
    inspect(&Radarr::new(FakeRadarr), query, &mut printer).await?;
    Ok(String::from_utf8(printer.into_inner()).unwrap())
}

#[tokio::test]
async fn markdown_with_stats() {
    let out = run("", OutputFormat::Md).await.unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Fetching media...");
    assert_eq!(lines[1], "Radarr has: 2 media entries with a size of 6.5 GB");
    assert_eq!(lines[2], "");
    assert!(lines[3].starts_with("| Title "));
    assert!(lines[5].starts_with("| Arrival (2016) "));
    assert!(lines[6].starts_with("| Heat (1995) "));
    assert_eq!(lines.len(), 7);
}

#[tokio::test]
async fn matched_stats_follow_a_narrowing_query() {
    let out = run("rg == ntb", OutputFormat::Md).await.unwrap();
    assert!(out.contains("The query matched: 1 media entries with a size of 4 GB\n"));
    assert!(out.contains("Arrival (2016)"));
    assert!(!out.contains("Heat"));
}

#[tokio::test]
async fn movie_without_file_never_matches() {
    let out = run("t == Wanted", OutputFormat::Md).await.unwrap();
    assert!(out.ends_with("The query matched: 0 media entries with a size of 0 B\n"));
    assert!(!out.contains('|'));

    let out = run("t == Wanted", OutputFormat::Json).await.unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn exclude_only_applies_to_markdown() {
    let md = run("* | EXCLUDE rg | SORT sz", OutputFormat::Md).await.unwrap();
    assert!(!md.contains("Release Group"));
    assert!(md.find("Heat").unwrap() < md.find("Arrival").unwrap());

    let json = run("* | EXCLUDE rg | SORT sz", OutputFormat::Json).await.unwrap();
    let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["title"], "Heat");
    assert_eq!(rows[0]["releaseGroup"], "FraMeSToR");
    assert_eq!(rows[1]["rawSize"], 4000000000u64);
}

#[tokio::test]
async fn json_output_is_quiet() {
    let out = run("m", OutputFormat::Json).await.unwrap();
    assert!(out.starts_with("[{\"title\":\"Arrival\""));
    assert!(!out.contains("Fetching"));
}

#[tokio::test]
async fn query_errors_read_as_a_chain() {
    let err = run("bogus", OutputFormat::Md).await.unwrap_err();
    assert_eq!(
        format!("{err:#}"),
        "failed to parse query 'bogus': Unknown field 'bogus'"
    );

    let err = run("* | SORT t up", OutputFormat::Md).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to apply operations to media with query '* | SORT t up'"
    );
    assert!(err.root_cause().to_string().contains("'SORT'"));
}
