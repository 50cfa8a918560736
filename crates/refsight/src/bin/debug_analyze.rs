use refsight::{analyze, AnalyzeOptions};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: {} <image>", args[0]);
        std::process::exit(1);
    }
    let path = PathBuf::from(&args[1]);
    let bytes = std::fs::read(&path).unwrap();

    let t = Instant::now();
    let result = analyze(&bytes, &AnalyzeOptions::default()).unwrap();
    let elapsed = t.elapsed();

    let stem = path.file_stem().unwrap().to_string_lossy();
    let out_dir = path
        .parent()
        .unwrap_or(Path::new("."))
        .join("debug_results");
    std::fs::create_dir_all(&out_dir).unwrap();

    std::fs::write(out_dir.join(format!("{stem}_value.png")), &result.value_map.png).unwrap();
    std::fs::write(
        out_dir.join(format!("{stem}_temperature.png")),
        &result.temperature_map.png,
    )
    .unwrap();
    for (i, level) in result.squint_levels.iter().enumerate() {
        std::fs::write(out_dir.join(format!("{stem}_squint{i}.png")), &level.png).unwrap();
    }

    for color in &result.dominant_colors {
        println!("{}  x{}", color.hex, color.count);
    }
    println!(
        "{}: {} colors, {} artifacts, {:?}",
        path.display(),
        result.dominant_colors.len(),
        2 + result.squint_levels.len(),
        elapsed,
    );
}
