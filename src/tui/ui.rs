use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::tui::TuiState;
use crate::tui::component::Component;

pub fn draw_ui(frame: &mut Frame, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let status_height = tui.status_bar.height(frame.area().width);
    let layout = Layout::vertical([Length(status_height), Min(0), Length(3)]);
    let [status_area, output_area, input_area] = layout.areas(frame.area());

    tui.status_bar.render(frame, status_area);
    tui.output.render(frame, output_area);
    tui.input.render(frame, input_area);
}
