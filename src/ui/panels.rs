use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – column pickers and editing controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Series");
    ui.separator();

    let Some(store) = &state.store else {
        ui.label("No file loaded.");
        return;
    };

    // Clone the names so we can mutate state inside the combo closures.
    let columns: Vec<String> = store.column_names().map(str::to_string).collect();

    column_picker(ui, "Date column", "date_column", &columns, &mut state.date_column);
    column_picker(
        ui,
        "Parameter column",
        "parameter_column",
        &columns,
        &mut state.parameter_column,
    );

    ui.add_space(4.0);
    if ui.button("Plot").clicked() {
        state.plot();
    }

    ui.separator();
    ui.heading("Edit");
    ui.separator();

    let plotted = state.plotted_parameter.is_some();

    let armed = state.selector.is_armed();
    if ui
        .add_enabled(plotted, egui::SelectableLabel::new(armed, "Select points"))
        .clicked()
    {
        state.toggle_selector();
    }

    if state.selection.is_empty() {
        ui.label("No points selected.");
    } else {
        ui.label(format!("{} points selected", state.selection.len()));
    }

    if ui
        .add_enabled(
            plotted && !state.selection.is_empty(),
            egui::Button::new("Set selected to missing"),
        )
        .clicked()
    {
        state.apply_selection();
    }
}

/// One labelled column ComboBox writing back into `choice`.
fn column_picker(
    ui: &mut Ui,
    label: &str,
    id: &str,
    columns: &[String],
    choice: &mut Option<String>,
) {
    ui.strong(label);
    let current = choice.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt(id)
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for col in columns {
                if ui.selectable_label(current == *col, col).clicked() {
                    *choice = Some(col.clone());
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.store.is_some(), egui::Button::new("Save As…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(store) = &state.store {
            ui.label(format!(
                "{} rows × {} columns",
                store.n_rows(),
                store.n_columns()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

/// Pick a CSV and load it.  Dismissing the dialog, or a failed load, leaves
/// any previously loaded store untouched.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open time series CSV")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_csv(&path) {
            Ok(store) => {
                log::info!(
                    "loaded {} rows, columns {:?}",
                    store.n_rows(),
                    store.column_names().collect::<Vec<_>>()
                );
                state.set_store(store);
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

/// Pick a destination and save the current store.
pub fn save_file_dialog(state: &mut AppState) {
    let Some(store) = &state.store else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Save CSV")
        .add_filter("CSV", &["csv"])
        .set_file_name("edited.csv")
        .save_file();

    if let Some(path) = file {
        match loader::save_csv(store, &path) {
            Ok(()) => {
                log::info!("saved to {}", path.display());
                state.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("failed to save {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
