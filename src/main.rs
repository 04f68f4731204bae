use herd_analyzer::image::ImageRgb8;
use herd_analyzer::{AnalysisInput, Analyzer, AnalyzerParams};

fn main() {
    // Demo stub: creates a fake RGB image buffer and runs the analyzer
    let w = 640usize;
    let h = 480usize;
    let rgb = vec![96u8; w * h * 3];
    let img = ImageRgb8 {
        w,
        h,
        stride: 3 * w,
        data: &rgb,
    };

    let analyzer = match Analyzer::new(AnalyzerParams::default()) {
        Ok(analyzer) => analyzer,
        Err(err) => {
            eprintln!("invalid parameters: {err}");
            std::process::exit(1);
        }
    };
    match analyzer.process(img, &AnalysisInput::default()) {
        Ok(report) => println!(
            "status={} score={} method={:?} latency_ms={:.3}",
            report.health.label, report.health.health_score, report.identification.method,
            report.latency_ms
        ),
        Err(err) => eprintln!("analysis failed: {err}"),
    }
}
