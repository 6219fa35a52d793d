//! Report generation tools
//!
//! Generate a PDF pressure report: a rider-mass sweep for a fixed setup,
//! tabulated and charted.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::*;
use printpdf::image_crate::{DynamicImage, ImageFormat, RgbImage};
use serde::Serialize;

use crate::models::{require_positive, PressureRequest, PressureWarning, ValidationError};
use crate::pressure::{round_to_tenth, PressureEstimator};

/// Rider mass increment between sweep rows, in the request's mass unit
pub const SWEEP_STEP: f64 = 5.0;
/// Upper bound on sweep rows
pub const MAX_SWEEP_ROWS: usize = 200;

// ============================================================================
// Color Constants (RGB 0-255)
// ============================================================================

const COLOR_TITLE: (u8, u8, u8) = (0, 84, 166);
const COLOR_FRONT: (u8, u8, u8) = (0, 112, 192);
const COLOR_REAR: (u8, u8, u8) = (192, 0, 0);
const COLOR_WARNING: (u8, u8, u8) = (255, 140, 0);
const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);
const COLOR_GRAY: (u8, u8, u8) = (128, 128, 128);

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub success: bool,
    pub file_path: String,
    pub rows: usize,
    pub mass_range: String,
    pub rows_with_warnings: usize,
    pub message: String,
}

/// One rider mass in the sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    pub rider_mass: f64,
    pub front: f64,
    pub rear: f64,
    pub warning: Option<PressureWarning>,
}

// ============================================================================
// Sweep
// ============================================================================

/// Check a rider mass range and return the number of whole steps in it.
///
/// The row count includes `max_mass` itself when it falls between steps.
pub fn check_sweep_range(min_mass: f64, max_mass: f64) -> Result<usize, ValidationError> {
    require_positive("rider_mass_min", min_mass)?;
    require_positive("rider_mass_max", max_mass)?;
    if max_mass < min_mass {
        return Err(ValidationError::InvalidRange(format!(
            "rider_mass_max ({}) is below rider_mass_min ({})",
            max_mass, min_mass
        )));
    }

    let too_many = || {
        ValidationError::InvalidRange(format!(
            "sweep would produce more than {} rows",
            MAX_SWEEP_ROWS
        ))
    };

    // Bound in floating point first; a huge span saturates the cast
    let span_steps = (max_mass - min_mass) / SWEEP_STEP;
    if span_steps >= MAX_SWEEP_ROWS as f64 {
        return Err(too_many());
    }

    let steps = span_steps.floor() as usize;
    let has_tail = sweep_mass(min_mass, steps) < max_mass;
    if steps + 1 + usize::from(has_tail) > MAX_SWEEP_ROWS {
        return Err(too_many());
    }
    Ok(steps)
}

fn sweep_mass(min_mass: f64, step: usize) -> f64 {
    min_mass + step as f64 * SWEEP_STEP
}

/// Estimate pressure at each rider mass from `min_mass` to `max_mass`
pub fn pressure_sweep(
    estimator: &PressureEstimator,
    request: &PressureRequest,
    min_mass: f64,
    max_mass: f64,
) -> Result<Vec<SweepRow>, ValidationError> {
    let steps = check_sweep_range(min_mass, max_mass)?;
    request.validate()?;

    let mut masses: Vec<f64> = (0..=steps).map(|i| sweep_mass(min_mass, i)).collect();
    if masses.last().is_some_and(|last| *last < max_mass) {
        masses.push(max_mass);
    }

    Ok(masses
        .into_iter()
        .map(|mass| {
            let result = estimator.estimate(&request.with_rider_mass(mass));
            SweepRow {
                rider_mass: mass,
                front: result.front,
                rear: result.rear,
                warning: result.warning,
            }
        })
        .collect())
}

// ============================================================================
// Chart Generation (plotters)
// ============================================================================

/// Generate the front/rear pressure chart as PNG bytes
pub fn generate_pressure_chart(
    rows: &[SweepRow],
    unit: &str,
    max_pressure: f64,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    use plotters::prelude::*;
    use plotters_bitmap::BitMapBackend;

    if rows.is_empty() {
        return Err("No data to chart".to_string());
    }

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let x_min = rows[0].rider_mass;
        let mut x_max = rows[rows.len() - 1].rider_mass;
        if x_max <= x_min {
            x_max = x_min + 1.0;
        }
        let y_max = max_pressure * 1.1;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .x_desc("Rider mass")
            .y_desc(unit)
            .draw()
            .map_err(|e| e.to_string())?;

        // Rim rating
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x_min, max_pressure), (x_max, max_pressure)],
                ShapeStyle::from(&RGBColor(255, 140, 0).mix(0.7)).stroke_width(1),
            )))
            .map_err(|e| e.to_string())?
            .label("Rim rating")
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], RGBColor(255, 140, 0).stroke_width(1))
            });

        let front_color = RGBColor(COLOR_FRONT.0, COLOR_FRONT.1, COLOR_FRONT.2);
        let front_points: Vec<(f64, f64)> = rows.iter().map(|r| (r.rider_mass, r.front)).collect();
        chart
            .draw_series(LineSeries::new(front_points.clone(), front_color.stroke_width(2)))
            .map_err(|e| e.to_string())?
            .label("Front")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], front_color.stroke_width(2))
            });
        chart
            .draw_series(front_points.iter().map(|(x, y)| Circle::new((*x, *y), 3, front_color.filled())))
            .map_err(|e| e.to_string())?;

        let rear_color = RGBColor(COLOR_REAR.0, COLOR_REAR.1, COLOR_REAR.2);
        let rear_points: Vec<(f64, f64)> = rows.iter().map(|r| (r.rider_mass, r.rear)).collect();
        chart
            .draw_series(LineSeries::new(rear_points.clone(), rear_color.stroke_width(2)))
            .map_err(|e| e.to_string())?
            .label("Rear")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], rear_color.stroke_width(2))
            });
        chart
            .draw_series(rear_points.iter().map(|(x, y)| Circle::new((*x, *y), 3, rear_color.filled())))
            .map_err(|e| e.to_string())?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }

    let img = RgbImage::from_raw(width, height, buffer).ok_or("Failed to create image from buffer")?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok(png_bytes)
}

// ============================================================================
// PDF Generation Helper Functions
// ============================================================================

fn rgb_to_printpdf(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

fn add_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    x: Mm,
    y: Mm,
    size: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb_to_printpdf(color.0, color.1, color.2));
    layer.use_text(text, size, x, y, font);
}

fn add_line(layer: &PdfLayerReference, x1: Mm, y1: Mm, x2: Mm, y2: Mm, color: (u8, u8, u8), width: f32) {
    layer.set_outline_color(rgb_to_printpdf(color.0, color.1, color.2));
    layer.set_outline_thickness(width);

    let line = Line {
        points: vec![(Point::new(x1, y1), false), (Point::new(x2, y2), false)],
        is_closed: false,
    };
    layer.add_line(line);
}

/// Resolve a report path against the report directory unless absolute
pub fn resolve_output_path(report_dir: &Path, output_path: &str) -> PathBuf {
    let path = Path::new(output_path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        report_dir.join(path)
    }
}

// ============================================================================
// Pressure Report Generation
// ============================================================================

/// Generate a pressure sweep PDF report
pub fn generate_pressure_report(
    estimator: &PressureEstimator,
    request: &PressureRequest,
    rider_mass_min: f64,
    rider_mass_max: f64,
    output_path: &Path,
) -> Result<GenerateReportResponse, String> {
    let rows = pressure_sweep(estimator, request, rider_mass_min, rider_mass_max)
        .map_err(|e| e.to_string())?;

    let unit = request.pressure_unit.as_str();
    let mass_unit = request.mass_unit.as_str();
    let max_pressure = round_to_tenth(
        request
            .pressure_unit
            .from_psi(estimator.max_pressure_psi(request.rim_type)),
    );
    let rows_with_warnings = rows.iter().filter(|r| r.warning.is_some()).count();
    let mass_range = format!("{} to {} {}", rider_mass_min, rider_mass_max, mass_unit);

    // Page 1 - Portrait: setup and table
    let (doc, page1, layer1) = PdfDocument::new(
        "Tire Pressure Report",
        Mm(215.9), // Letter width
        Mm(279.4), // Letter height
        "Layer 1",
    );

    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(|e| e.to_string())?;
    let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(|e| e.to_string())?;

    let mut layer = doc.get_page(page1).get_layer(layer1);

    let page_height = 279.4;
    let margin_left = 15.0;
    let mut y = page_height - 20.0;

    add_text(&layer, &font_bold, "Tire Pressure Report", Mm(margin_left), Mm(y), 18.0, COLOR_TITLE);
    y -= 10.0;

    let now = chrono::Local::now().format("%Y-%m-%d").to_string();
    add_text(&layer, &font, &format!("Generated: {}", now), Mm(margin_left), Mm(y), 11.0, COLOR_BLACK);
    add_text(&layer, &font, &format!("Rider mass: {}", mass_range), Mm(110.0), Mm(y), 11.0, COLOR_BLACK);
    y -= 8.0;

    add_line(&layer, Mm(margin_left), Mm(y), Mm(200.0), Mm(y), COLOR_GRAY, 0.5);
    y -= 8.0;

    add_text(&layer, &font_bold, "Setup", Mm(margin_left), Mm(y), 12.0, COLOR_BLACK);
    y -= 7.0;

    let setup_lines = [
        format!("Ride style: {}", request.ride_style.display_name()),
        format!("Rim type: {}", request.rim_type.display_name()),
        format!(
            "Tires: {} mm front / {} mm rear, inner rim {} mm",
            request.front_tire_width, request.rear_tire_width, request.inner_rim_width
        ),
        format!("Bike mass: {} {}", request.bike_mass, mass_unit),
        format!("Rim rating: {:.1} {}", max_pressure, unit),
    ];
    for line in &setup_lines {
        add_text(&layer, &font, line, Mm(margin_left), Mm(y), 10.0, COLOR_BLACK);
        y -= 5.5;
    }
    y -= 6.0;

    add_text(&layer, &font_bold, "Recommended Pressure", Mm(margin_left), Mm(y), 12.0, COLOR_BLACK);
    y -= 7.0;

    let col_widths = [35.0, 30.0, 30.0, 80.0];
    let headers = [
        format!("Rider ({})", mass_unit),
        format!("Front ({})", unit),
        format!("Rear ({})", unit),
        "Note".to_string(),
    ];
    let mut col_x = margin_left;
    for (i, header) in headers.iter().enumerate() {
        add_text(&layer, &font_bold, header, Mm(col_x), Mm(y), 9.0, COLOR_BLACK);
        col_x += col_widths[i];
    }
    y -= 5.0;

    for row in &rows {
        if y < 20.0 {
            let (page, page_layer) = doc.add_page(Mm(215.9), Mm(279.4), "Table Page");
            layer = doc.get_page(page).get_layer(page_layer);
            y = page_height - 20.0;
        }

        let note = match row.warning {
            Some(PressureWarning::ExceedsRimRating) => "Clamped to rim rating",
            Some(PressureWarning::RimIncompatible) => "Check rim compatibility",
            None => "",
        };
        let row_color = if row.warning.is_some() { COLOR_WARNING } else { COLOR_BLACK };
        let values = [
            format!("{:.1}", row.rider_mass),
            format!("{:.1}", row.front),
            format!("{:.1}", row.rear),
            note.to_string(),
        ];

        col_x = margin_left;
        for (i, value) in values.iter().enumerate() {
            add_text(&layer, &font, value, Mm(col_x), Mm(y), 8.0, row_color);
            col_x += col_widths[i];
        }
        y -= 4.5;
    }

    // Page 2 - Landscape for Chart
    let (page2, layer2) = doc.add_page(Mm(279.4), Mm(215.9), "Chart Page");
    let layer2 = doc.get_page(page2).get_layer(layer2);

    let landscape_height = 215.9;
    let mut y2 = landscape_height - 20.0;

    add_text(&layer2, &font_bold, "Pressure by Rider Mass", Mm(margin_left), Mm(y2), 16.0, COLOR_TITLE);
    add_text(
        &layer2,
        &font,
        &format!("{} / {}", request.ride_style.display_name(), request.rim_type.display_name()),
        Mm(140.0),
        Mm(y2),
        11.0,
        COLOR_BLACK,
    );
    y2 -= 10.0;

    match generate_pressure_chart(&rows, unit, max_pressure, 1000, 400) {
        Ok(png_bytes) => {
            let dynamic_image =
                printpdf::image_crate::load_from_memory(&png_bytes).map_err(|e| e.to_string())?;
            let pdf_image = Image::from_dynamic_image(&dynamic_image);

            // 1000x400 pixels at 120 DPI = ~212mm x 85mm
            let transform = ImageTransform {
                translate_x: Some(Mm(margin_left)),
                translate_y: Some(Mm(y2 - 90.0)),
                dpi: Some(120.0),
                ..Default::default()
            };
            pdf_image.add_to_layer(layer2.clone(), transform);
            y2 -= 95.0;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Pressure chart generation failed");
            add_text(
                &layer2,
                &font,
                &format!("Chart generation error: {}", e),
                Mm(margin_left),
                Mm(y2 - 10.0),
                9.0,
                COLOR_WARNING,
            );
            y2 -= 15.0;
        }
    }

    y2 -= 5.0;
    add_text(&layer2, &font_bold, "Legend:", Mm(margin_left), Mm(y2), 10.0, COLOR_BLACK);
    add_text(&layer2, &font, "Front", Mm(45.0), Mm(y2), 10.0, COLOR_FRONT);
    add_text(&layer2, &font, "Rear", Mm(70.0), Mm(y2), 10.0, COLOR_REAR);
    add_text(&layer2, &font, "Rim rating", Mm(95.0), Mm(y2), 10.0, COLOR_WARNING);
    y2 -= 10.0;
    add_text(
        &layer2,
        &font,
        "Recommendations are a starting point. Adjust for preference, terrain and conditions.",
        Mm(margin_left),
        Mm(y2),
        9.0,
        COLOR_GRAY,
    );

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    let file = File::create(output_path).map_err(|e| e.to_string())?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).map_err(|e| e.to_string())?;

    tracing::info!(
        path = %output_path.display(),
        rows = rows.len(),
        "Generated pressure report"
    );

    Ok(GenerateReportResponse {
        success: true,
        file_path: output_path.display().to_string(),
        rows: rows.len(),
        mass_range: mass_range.clone(),
        rows_with_warnings,
        message: format!(
            "Pressure report generated with {} rows over {}",
            rows.len(),
            mass_range
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RideStyle, RimType};

    fn gravel() -> PressureRequest {
        PressureRequest {
            ride_style: RideStyle::Gravel,
            front_tire_width: 40.0,
            rear_tire_width: 40.0,
            inner_rim_width: 25.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_sweep_includes_both_ends() {
        let rows = pressure_sweep(&PressureEstimator::default(), &gravel(), 40.0, 52.0).unwrap();
        let masses: Vec<f64> = rows.iter().map(|r| r.rider_mass).collect();
        assert_eq!(masses, vec![40.0, 45.0, 50.0, 52.0]);
    }

    #[test]
    fn test_sweep_single_point() {
        let rows = pressure_sweep(&PressureEstimator::default(), &gravel(), 75.0, 75.0).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].front, rows[0].rear), (34.7, 47.9));
    }

    #[test]
    fn test_sweep_pressure_rises_with_mass() {
        let rows = pressure_sweep(&PressureEstimator::default(), &gravel(), 40.0, 150.0).unwrap();
        assert_eq!(rows.len(), 23);
        for pair in rows.windows(2) {
            assert!(pair[1].front >= pair[0].front);
            assert!(pair[1].rear >= pair[0].rear);
        }
    }

    #[test]
    fn test_sweep_rejects_bad_range() {
        let est = PressureEstimator::default();
        assert!(matches!(
            pressure_sweep(&est, &gravel(), 100.0, 50.0),
            Err(ValidationError::InvalidRange(_))
        ));
        assert!(pressure_sweep(&est, &gravel(), 0.0, 50.0).is_err());
        assert!(pressure_sweep(&est, &gravel(), 1.0, 5000.0).is_err());
    }

    #[test]
    fn test_sweep_range_huge_span() {
        assert!(matches!(
            check_sweep_range(1.0, 1e20),
            Err(ValidationError::InvalidRange(_))
        ));
        assert!(matches!(
            check_sweep_range(1.0, f64::MAX),
            Err(ValidationError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_sweep_row_limit_counts_end_row() {
        let est = PressureEstimator::default();

        // 1, 6, ..., 996 is exactly the limit
        let rows = pressure_sweep(&est, &gravel(), 1.0, 996.0).unwrap();
        assert_eq!(rows.len(), MAX_SWEEP_ROWS);

        // Same steps plus a trailing 1000.5 row is one too many
        assert!(matches!(
            check_sweep_range(1.0, 1000.5),
            Err(ValidationError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_sweep_flags_clamped_rows() {
        let req = PressureRequest {
            front_tire_width: 23.0,
            rear_tire_width: 23.0,
            inner_rim_width: 17.0,
            rim_type: RimType::Hookless,
            ..Default::default()
        };
        let rows = pressure_sweep(&PressureEstimator::default(), &req, 40.0, 120.0).unwrap();
        let last = rows.last().unwrap();
        assert_eq!(last.warning, Some(PressureWarning::ExceedsRimRating));
        assert_eq!(last.rear, 72.0);
    }

    #[test]
    fn test_chart_rejects_empty() {
        assert!(generate_pressure_chart(&[], "psi", 120.0, 200, 100).is_err());
    }

    #[test]
    fn test_resolve_output_path() {
        let dir = Path::new("/tmp/reports");
        assert_eq!(resolve_output_path(dir, "a.pdf"), PathBuf::from("/tmp/reports/a.pdf"));
        assert_eq!(resolve_output_path(dir, "/var/b.pdf"), PathBuf::from("/var/b.pdf"));
    }

    #[test]
    fn test_generate_pressure_report_writes_pdf() {
        let path = std::env::temp_dir()
            .join(format!("tpm_report_{}", std::process::id()))
            .join("gravel.pdf");
        let resp = generate_pressure_report(
            &PressureEstimator::default(),
            &gravel(),
            60.0,
            90.0,
            &path,
        )
        .unwrap();

        assert!(resp.success);
        assert_eq!(resp.rows, 7);
        assert_eq!(resp.rows_with_warnings, 0);

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }
}
