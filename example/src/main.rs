//! Scripted walk through a chips control rendered as text cells.
//!
//! Run with `RUST_LOG=chipsview=debug` to see layout and selection events.
use chipsview::{
    ChipsConfig, ChipsView, InputEvent, Interaction, dp::Dp, measure::MonospaceMeasurer, px::Px,
};
use tracing::{info, warn};

type Recipients = ChipsView<u32, String, MonospaceMeasurer>;

const CONTAINER_CELLS: i32 = 36;

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,chipsview=info,example=info")
        {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn render(view: &Recipients) {
    let Some(layout) = view.layout() else {
        println!("(waiting for the container to be measured)");
        return;
    };

    let rows = view.rows();
    let last = rows.len().saturating_sub(1);
    for (index, row) in rows.iter().enumerate() {
        let mut line: String = row
            .iter()
            .map(|chip| {
                if chip.is_selected() {
                    format!("<{} x> ", chip.label())
                } else {
                    format!("[{}] ", chip.label())
                }
            })
            .collect();
        if index == last {
            let margin = usize::try_from(layout.text_margin().first_line.raw()).unwrap_or(0);
            line = format!("{line:<margin$}{}_", view.text());
        }
        println!("| {line:<width$} |", width = CONTAINER_CELLS as usize);
    }
    println!(
        "  {} rows, {} tall, viewport {}",
        layout.row_count(),
        layout.content_height(),
        layout.viewport_height()
    );
}

fn main() {
    init_tracing();

    // One cell per grapheme, two cells of brackets, one cell of gap.
    let config = ChipsConfig::default()
        .chip_height(Dp(1.0))
        .vertical_spacing(Dp(0.0))
        .spacing_top(Dp(0.0))
        .chip_end_margin(Dp(1.0))
        .max_height(Dp(3.0));
    let measurer = MonospaceMeasurer::from_metrics(Px(1), Px(2), &config.metrics());
    let mut view: Recipients = match ChipsView::new(config, measurer) {
        Ok(view) => view,
        Err(err) => {
            warn!("invalid configuration: {err}");
            return;
        }
    };

    view.set_chip_added_listener(|name: &String| info!("added {name}"));
    view.set_chip_deleted_listener(|name: &String| info!("removed {name}"));
    view.set_text_changed_listener(|query: &str| info!("query is now {query:?}"));

    for (key, name) in ["ada", "grace", "barbara", "margaret"].into_iter().enumerate() {
        view.add_chip(None, None, key as u32, name.to_owned());
    }
    view.add_chip_with(None, None, 99, "me".to_owned(), true);
    render(&view);

    view.measurer_mut().set_container_width(Px(CONTAINER_CELLS));
    view.on_frame();
    render(&view);

    for text in ["l", "i", "n"] {
        view.handle_input(&InputEvent::CommitText(text.to_owned()));
    }
    render(&view);

    view.add_chip(None, None, 4, "linus".to_owned());
    if view.take_scroll_to_bottom()
        && let Some(layout) = view.layout()
    {
        info!("scroll to {}", layout.bottom_scroll_offset());
    }
    render(&view);

    // Backspace on empty text first selects, then deletes.
    view.handle_input(&InputEvent::BACKSPACE_DOWN);
    render(&view);
    view.handle_input(&InputEvent::BACKSPACE_DOWN);
    render(&view);

    if let Interaction::Refused(key) = view.tap_chip(&99) {
        info!("chip {key} cannot be removed by the user");
    }
    view.tap_chip(&1);
    render(&view);
    view.tap_container();
    render(&view);
}
