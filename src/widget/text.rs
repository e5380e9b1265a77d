//! Terminal rendering of a slider view

use crate::widget::SliderView;

const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

const ANSI_RESET: &str = "\x1b[0m";

fn level_glyph(height_percent: f32) -> char {
    let scaled = (height_percent.clamp(0.0, 100.0) / 100.0 * (LEVELS.len() - 1) as f32).round();
    LEVELS[scaled as usize]
}

/// Render a view as three terminal lines: waveform, progress, transport
///
/// With `ansi` the waveform glyphs are colored with the view's colors;
/// without it the progress line alone shows the played portion.
pub fn render_text(view: &SliderView, ansi: bool) -> String {
    let mut waveform = String::new();
    let mut progress = String::new();

    for bar in &view.bars {
        if ansi {
            waveform.push_str(&bar.color.ansi_fg());
        }
        waveform.push(level_glyph(bar.height_percent));
        progress.push(if bar.played { '━' } else { '─' });
    }
    if ansi && !view.bars.is_empty() {
        waveform.push_str(ANSI_RESET);
    }

    let toggle = match view.toggle_label.as_str() {
        "Pause" => "⏸",
        _ => "▶",
    };
    let transport = format!("{}  ⏮ {} ⏭  {}", view.elapsed_label, toggle, view.duration_label);

    format!("{}\n{}\n{}", waveform, progress, transport)
}
