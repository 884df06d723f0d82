//! MotionLab CLI
//!
//! 랜드마크 JSON → 각도/구간 분석 리포트, sport config 조회/검증/스키마 출력.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use motionlab_core::config::{sports_file_schema, AngleSpace};
use motionlab_core::{AnalysisReport, AnalyzerSettings, LandmarkSequence, MotionAnalyzer, SportConfigStore};

#[derive(Parser)]
#[command(name = "motionlab")]
#[command(about = "Joint angles and motion phases from pose landmarks", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a landmark sequence and print the report as JSON
    Analyze {
        /// Landmark sequence JSON file
        #[arg(long)]
        input: PathBuf,

        /// Sport key (e.g. GOLF, WEIGHT)
        #[arg(long)]
        sport: String,

        /// Sub-category key (e.g. DRIVER, SQUAT)
        #[arg(long)]
        sub_category: String,

        /// Sports config YAML (embedded config when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the sequence's fps
        #[arg(long)]
        fps: Option<f64>,

        /// Minimum landmark visibility in [0, 1]
        #[arg(long)]
        min_visibility: Option<f64>,

        /// Include depth (z) in vertex angles
        #[arg(long, default_value = "false")]
        spatial: bool,

        /// Pretty-print the JSON report
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// List available sport / sub-category pairs
    List {
        /// Sports config YAML (embedded config when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load and validate a sports config file
    Validate {
        /// Sports config YAML
        #[arg(long)]
        config: PathBuf,
    },

    /// Print the JSON Schema of the sports config file
    Schema,
}

/// Execute `command`, writing its output to `out`.
pub fn run(command: Commands, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Analyze {
            input,
            sport,
            sub_category,
            config,
            fps,
            min_visibility,
            spatial,
            pretty,
        } => {
            let mut settings =
                AnalyzerSettings::from_env().context("Failed to read analyzer settings")?;
            if let Some(path) = config {
                settings.sports_config_path = Some(path);
            }
            if let Some(v) = min_visibility {
                settings.min_visibility = v;
            }
            if spatial {
                settings.angle_space = AngleSpace::Spatial;
            }
            settings
                .ensure_valid()
                .context("Invalid analyzer settings")?;

            let report = analyze_file(&input, &sport, &sub_category, fps, &settings)?;
            let json = report.to_json(pretty)?;
            writeln!(out, "{}", json)?;
        }

        Commands::List { config } => {
            let store = load_store(config.as_deref())?;
            for (sport, sub) in store.keys() {
                writeln!(out, "{}/{}", sport, sub)?;
            }
        }

        Commands::Validate { config } => {
            let store = load_store(Some(&config))?;
            writeln!(
                out,
                "✅ {}: {} configurations valid",
                config.display(),
                store.len()
            )?;
            for (sport, sub) in store.keys() {
                writeln!(out, "   {}/{}", sport, sub)?;
            }
        }

        Commands::Schema => {
            writeln!(out, "{}", config_schema_json()?)?;
        }
    }

    Ok(())
}

/// Load `path`, or the embedded config when `None`.
pub fn load_store(path: Option<&Path>) -> Result<SportConfigStore> {
    SportConfigStore::load(path).with_context(|| match path {
        Some(p) => format!("Failed to load sports config: {}", p.display()),
        None => "Failed to load embedded sports config".to_string(),
    })
}

/// Read a landmark sequence file and run the full pipeline on it.
pub fn analyze_file(
    input: &Path,
    sport: &str,
    sub_category: &str,
    fps: Option<f64>,
    settings: &AnalyzerSettings,
) -> Result<AnalysisReport> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("Failed to read landmark file: {}", input.display()))?;
    let mut sequence = LandmarkSequence::from_json(&json)
        .with_context(|| format!("Failed to parse landmark file: {}", input.display()))?;
    if let Some(fps) = fps {
        sequence.fps = fps;
    }

    let store = load_store(settings.sports_config_path.as_deref())?;
    let analyzer = MotionAnalyzer::new(&store, settings);
    let report = analyzer
        .analyze(&sequence, sport, sub_category)
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.error_code(), e))?;

    info!(
        input = %input.display(),
        phases = report.phases.len(),
        "report ready"
    );
    Ok(report)
}

pub fn config_schema_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&sports_file_schema())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use motionlab_core::landmarks::{Landmark, LANDMARK_COUNT};
    use motionlab_core::{Frame, Point};
    use tempfile::NamedTempFile;

    const SERVE_YAML: &str = r#"
TENNIS:
  sub_categories:
    SERVE:
      angles:
        right_elbow:
          points: [right_shoulder, right_elbow, right_wrist]
          ideal_range: [100.0, 120.0]
      phases:
        - name: trophy
          detection_rule: angle_min
          target_angle: right_elbow
          params: { window_size: 2 }
"#;

    fn write_temp(contents: &str) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(contents.as_bytes())?;
        Ok(file)
    }

    /// Right arm bending down to 90 degrees at frame 5 and back.
    fn serve_sequence() -> LandmarkSequence {
        let frames = (0..11u32)
            .map(|i| {
                let degrees = 90.0 + (i as f64 - 5.0).abs() * 10.0;
                let rad = degrees.to_radians();
                let mut points = vec![Point::new(0.0, 0.0, 0.0, 0.0); LANDMARK_COUNT];
                points[Landmark::RightShoulder.index()] = Point::planar(0.0, 0.0);
                points[Landmark::RightElbow.index()] = Point::planar(1.0, 0.0);
                points[Landmark::RightWrist.index()] = Point::planar(1.0 - rad.cos(), rad.sin());
                Frame::new(i, i as f64 / 30.0, points)
            })
            .collect();
        LandmarkSequence::new(30.0, frames)
    }

    fn output_of(command: Commands) -> Result<String> {
        let mut out = Vec::new();
        run(command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_list_embedded() -> Result<()> {
        let out = output_of(Commands::List { config: None })?;
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "GOLF/DRIVER");
        assert!(lines.contains(&"WEIGHT/SQUAT"));
        Ok(())
    }

    #[test]
    fn test_validate_external_config() -> Result<()> {
        let file = write_temp(SERVE_YAML)?;
        let out = output_of(Commands::Validate {
            config: file.path().to_path_buf(),
        })?;
        assert!(out.contains("1 configurations valid"));
        assert!(out.contains("TENNIS/SERVE"));
        Ok(())
    }

    #[test]
    fn test_validate_rejects_bad_landmark() -> Result<()> {
        let file = write_temp(&SERVE_YAML.replace("right_wrist", "right_racket"))?;
        let err = output_of(Commands::Validate {
            config: file.path().to_path_buf(),
        })
        .unwrap_err();
        assert!(format!("{:#}", err).contains("right_racket"));
        Ok(())
    }

    #[test]
    fn test_load_store_adds_path_context() {
        let err = load_store(Some(Path::new("/nonexistent/sports.yaml"))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to load sports config: /nonexistent/sports.yaml"
        );
        assert_eq!(load_store(None).map(|s| s.len()).ok(), Some(6));
    }

    #[test]
    fn test_analyze_end_to_end() -> Result<()> {
        let config = write_temp(SERVE_YAML)?;
        let input = write_temp(&serde_json::to_string(&serve_sequence())?)?;

        let settings = AnalyzerSettings {
            sports_config_path: Some(config.path().to_path_buf()),
            ..AnalyzerSettings::default()
        };
        let report = analyze_file(input.path(), "tennis", "serve", None, &settings)?;

        assert_eq!(report.frame_angles.len(), 11);
        let trophy = report.phase("trophy").expect("trophy phase");
        assert_eq!((trophy.start_frame, trophy.end_frame), (3, 7));
        assert_eq!(report.average_angles.get("right_elbow"), Some(&117.3));
        Ok(())
    }

    #[test]
    fn test_analyze_unknown_sport_reports_code() -> Result<()> {
        let input = write_temp(&serde_json::to_string(&serve_sequence())?)?;
        let err = analyze_file(input.path(), "GOLF", "WEDGE", None, &AnalyzerSettings::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("[AN_005]"));
        Ok(())
    }

    #[test]
    fn test_analyze_missing_input() {
        let err = analyze_file(
            Path::new("/nonexistent/frames.json"),
            "GOLF",
            "DRIVER",
            None,
            &AnalyzerSettings::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read landmark file"));
    }

    #[test]
    fn test_schema_output_is_json() -> Result<()> {
        let schema: serde_json::Value = serde_json::from_str(&config_schema_json()?)?;
        assert!(schema.get("$schema").is_some());
        Ok(())
    }
}
