mod logging;
mod runtime_config;

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use image::RgbImage;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use runtime_config::Config;

use deinterlace_labels::{
    export::{self, OutputLayout},
    interpolator::{Interpolator, ResultFrame},
    strategy::Strategy,
};

fn main() -> Result<()> {
    // get command line flags
    let config = Config::new().context("could not parse command line flags")?;

    let output_folder = Path::new(&config.output_folder);
    fs::create_dir_all(output_folder).context("could not create output folder")?;

    // logging setup
    let log_file_path = output_folder.join(logging::log_file_name());
    if config.verbose {
        logging::init(log::LevelFilter::Trace, log_file_path)
            .context("could not set logging level to verbose")?;
    } else {
        logging::init(log::LevelFilter::Info, log_file_path)
            .context("could not set default logging level")?;
    }
    // verbose output is only readable without interleaving
    let threads = if config.verbose { 1 } else { config.threads };
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("could not set rayon number of threads")?;

    let layout = OutputLayout::new(output_folder);
    layout.create_dirs(config.weave, config.save_fields && config.field_folder.is_none())?;

    let frames = list_frames(&config.input_folder, config.sample_period)?;
    log::info!(
        "scoring {} frame(s) from {} ({} field kept, {} thread(s))...",
        frames.len(),
        config.input_folder,
        config.field,
        threads
    );

    let interpolator = Interpolator::new(config.field);
    let failures: usize = frames
        .par_iter()
        .map(
            |path| match handle_frame_file(path, &config, &interpolator, &layout) {
                Ok(()) => 0,
                Err(err) => {
                    log::error!("Error: {}: {:?}", path.to_string_lossy(), err);
                    1
                }
            },
        )
        .sum();

    if failures > 0 {
        log::warn!("{} of {} frame(s) skipped", failures, frames.len());
    }
    log::info!("done");
    log::logger().flush();
    Ok(())
}

/// Lists the PNG frames of the input folder in file name order and keeps
/// every `sample_period`-th of them.
fn list_frames(input_folder: &str, sample_period: usize) -> Result<Vec<PathBuf>> {
    let mut frames = Vec::new();
    for entry in fs::read_dir(input_folder).context("could not read input folder")? {
        let path = entry.context("could not read input folder entry")?.path();
        if !path.is_file() {
            continue;
        }
        if is_png(&path) {
            frames.push(path);
        } else {
            log::debug!("skipping non-PNG file {}", path.to_string_lossy());
        }
    }
    frames.sort();
    Ok(frames.into_iter().step_by(sample_period).collect())
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map_or(false, |extension| extension.eq_ignore_ascii_case("png"))
}

/// Scores one progressive frame and writes its result images.
fn handle_frame_file(
    path: &Path,
    config: &Config,
    interpolator: &Interpolator,
    layout: &OutputLayout,
) -> Result<()> {
    let frame_name = get_file_name_from_path(path)?;
    let frame = open_rgb(path).context("could not open progressive frame")?;

    let field_image = match &config.field_folder {
        Some(field_folder) => {
            let field_path = Path::new(field_folder).join(
                path.file_name()
                    .ok_or_else(|| anyhow!("frame has no file name: {:?}", path))?,
            );
            open_rgb(&field_path).with_context(|| {
                format!("could not open field (expected it in {:?})", field_path)
            })?
        }
        None => {
            let field_image = config
                .field
                .extract(&frame)
                .context("could not split frame into fields")?;
            if config.save_fields {
                layout.save_field(frame_name, &field_image)?;
            }
            field_image
        }
    };

    let result = interpolator
        .interpolate_frame(&field_image, &frame)
        .context("could not interpolate frame")?;
    log_win_counts(frame_name, &result);

    layout
        .save_result(frame_name, &result)
        .context("could not save result images")?;
    if config.weave {
        let woven = export::weave(&field_image, result.best(), interpolator.field());
        layout.save_woven(frame_name, &woven)?;
    }
    Ok(())
}

fn log_win_counts(frame_name: &str, result: &ResultFrame) {
    let counts = result.win_counts();
    let total: usize = Strategy::ALL.iter().map(|s| *counts.get(*s)).sum();
    let summary: Vec<String> = Strategy::ALL
        .iter()
        .map(|s| format!("{} {}", s, counts.get(*s)))
        .collect();
    log::info!("{}: {} pixels, {}", frame_name, total, summary.join(", "));
}

fn open_rgb(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).with_context(|| format!("could not decode {:?}", path))?;
    Ok(image.into_rgb8())
}

/// Converts the given path to a string that contains the raw file-name without directories or extension.
fn get_file_name_from_path(path: &Path) -> Result<&str> {
    let file_name = path
        .file_stem()
        .ok_or(anyhow!("file does not have valid filename: {:?}", path))?
        .to_str()
        .ok_or(anyhow!(
            "file does not have a valid utf-8 filename: {:?}",
            path
        ))?;
    Ok(file_name)
}

#[cfg(test)]
mod tests {
    use std::env;

    use image::Rgb;

    use super::*;
    use deinterlace_labels::{error::InterpolationError, field::Field};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!(
            "deinterlace-labels-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config(input: &Path, output: &Path) -> Config {
        Config {
            input_folder: input.to_string_lossy().into_owned(),
            output_folder: output.to_string_lossy().into_owned(),
            field_folder: None,
            field: Default::default(),
            sample_period: 1,
            threads: 1,
            weave: true,
            save_fields: true,
            verbose: false,
        }
    }

    #[test]
    fn list_frames_sorts_filters_and_samples() {
        let dir = scratch_dir("list");
        for name in &["Frame_2.png", "Frame_0.png", "Frame_1.PNG", "notes.txt", "Frame_3.png"] {
            fs::write(dir.join(name), b"").unwrap();
        }
        let all = list_frames(dir.to_str().unwrap(), 1).unwrap();
        let names: Vec<String> = all
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Frame_0.png", "Frame_1.PNG", "Frame_2.png", "Frame_3.png"]);

        let sampled = list_frames(dir.to_str().unwrap(), 3).unwrap();
        assert_eq!(sampled, vec![dir.join("Frame_0.png"), dir.join("Frame_3.png")]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn frame_file_is_processed_end_to_end() {
        let input = scratch_dir("e2e-in");
        let output = scratch_dir("e2e-out");
        let frame = RgbImage::from_fn(12, 16, |x, y| Rgb([(x * 9) as u8, (y * 5) as u8, 60]));
        frame.save(input.join("Frame_0.png")).unwrap();

        let config = config(&input, &output);
        let layout = OutputLayout::new(&output);
        layout.create_dirs(true, true).unwrap();
        handle_frame_file(&input.join("Frame_0.png"), &config, &Interpolator::default(), &layout)
            .unwrap();

        let best = open_rgb(&layout.path(export::BEST_FOLDER, "Frame_0")).unwrap();
        assert_eq!(best.dimensions(), (12, 8));
        let field_image = open_rgb(&layout.path(export::FIELD_FOLDER, "Frame_0")).unwrap();
        assert_eq!(field_image, Field::Odd.extract(&frame).unwrap());
        let woven = open_rgb(&layout.path(export::WOVEN_FOLDER, "Frame_0")).unwrap();
        assert_eq!(woven.dimensions(), (12, 16));

        fs::remove_dir_all(&input).unwrap();
        fs::remove_dir_all(&output).unwrap();
    }

    #[test]
    fn pre_split_field_with_wrong_height_is_rejected() {
        let input = scratch_dir("split-in");
        let fields = scratch_dir("split-fields");
        let output = scratch_dir("split-out");
        RgbImage::from_pixel(10, 12, Rgb([1, 2, 3]))
            .save(input.join("Frame_0.png"))
            .unwrap();
        RgbImage::from_pixel(10, 5, Rgb([1, 2, 3]))
            .save(fields.join("Frame_0.png"))
            .unwrap();

        let mut config = config(&input, &output);
        config.field_folder = Some(fields.to_string_lossy().into_owned());
        let layout = OutputLayout::new(&output);
        layout.create_dirs(false, false).unwrap();
        let err = handle_frame_file(&input.join("Frame_0.png"), &config, &Interpolator::default(), &layout)
            .unwrap_err();
        assert!(err
            .chain()
            .any(|cause| cause.downcast_ref::<InterpolationError>().is_some()));

        for dir in &[input, fields, output] {
            fs::remove_dir_all(dir).unwrap();
        }
    }

    #[test]
    fn png_extension_is_case_insensitive() {
        assert!(is_png(Path::new("frames/Frame_0.png")));
        assert!(is_png(Path::new("frames/Frame_0.PNG")));
        assert!(is_png(Path::new("frames/clip.0001.Png")));
        assert!(!is_png(Path::new("frames/Frame_0.jpg")));
        assert!(!is_png(Path::new("frames/png")));
    }

    #[test]
    fn file_stem_is_frame_name() {
        assert_eq!(
            get_file_name_from_path(Path::new("frames/Frame_42.png")).unwrap(),
            "Frame_42"
        );
    }
}
