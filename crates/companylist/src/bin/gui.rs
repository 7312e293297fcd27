use anyhow::Context as AnyhowContext;
use chrono::Local;
use eframe::{
    NativeOptions,
    egui::{self, ViewportBuilder},
};
use egui_extras::{Column, TableBuilder};
use rfd::FileDialog;
use tracing_subscriber::EnvFilter;

use companylist::core::query::FilterColumn;
use companylist::core::record::COLUMN_NAMES;
use companylist::core::reference::{ReferenceLists, load_reference_lists, reference_path};
use companylist::db::config::DbConfig;
use companylist::db::postgres::PgStore;
use companylist::export::{ExportError, ExportFile};
use companylist::session::Session;

const APP_TITLE: &str = "Company List Builder";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Both of these are fatal: without the reference lists there is nothing
    // to select, and without the store there is nothing to query.
    let reference_path = reference_path();
    let reference = load_reference_lists(&reference_path)
        .with_context(|| format!("Cannot start without {}", reference_path.display()))?;
    let store = PgStore::connect(&DbConfig::from_env()?)?;

    let native_options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_min_inner_size([900.0, 600.0])
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(move |_cc| Ok(Box::new(CompanyListApp::new(reference, store)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}

struct CompanyListApp {
    reference: ReferenceLists,
    store: PgStore,
    session: Session,
    /// Store failure for the current interaction (red banner).
    error: Option<String>,
    /// Refused export or other user-facing notice (amber banner).
    notice: Option<String>,
}

impl CompanyListApp {
    fn new(reference: ReferenceLists, store: PgStore) -> Self {
        CompanyListApp {
            reference,
            store,
            session: Session::new(),
            error: None,
            notice: None,
        }
    }

    fn on_fetch(&mut self) {
        self.error = None;
        self.notice = None;
        if let Err(e) = self.session.fetch(&self.store) {
            tracing::warn!(error = %e, "fetch failed");
            self.error = Some(e.to_string());
        }
    }

    fn on_export(&mut self) {
        self.error = None;
        self.notice = None;
        match self.session.export(&self.store, Local::now()) {
            Ok(file) => self.save_export(file),
            Err(ExportError::Store(e)) => {
                tracing::warn!(error = %e, "export query failed");
                self.error = Some(e.to_string());
            }
            Err(refused) => self.notice = Some(refused.to_string()),
        }
    }

    /// Desktop stand-in for a browser download: let the user pick where the
    /// workbook bytes go, pre-filled with the timestamped name.
    fn save_export(&mut self, file: ExportFile) {
        let picked = FileDialog::new()
            .add_filter("Excel", &["xlsx"])
            .set_file_name(file.file_name.as_str())
            .save_file();

        let Some(path) = picked else {
            return; // user cancelled, nothing to report
        };
        match std::fs::write(&path, &file.bytes) {
            Ok(()) => {
                self.notice = Some(format!(
                    "Exported {} companies to {}",
                    file.rows,
                    path.display()
                ));
            }
            Err(e) => {
                self.error = Some(format!("Failed to write {}: {e}", path.display()));
            }
        }
    }

    fn on_reset(&mut self) {
        self.session.reset();
        self.error = None;
        self.notice = None;
    }

    fn selection_column(&mut self, ui: &mut egui::Ui, column: FilterColumn) {
        let values = match column {
            FilterColumn::Region => &self.reference.regions,
            FilterColumn::PrimaryIndustry => &self.reference.primary_industries,
            FilterColumn::SecondaryIndustry => &self.reference.secondary_industries,
        };

        ui.strong(column.label());
        egui::ScrollArea::vertical()
            .id_salt(column.column_name())
            .max_height(220.0)
            .show(ui, |ui| {
                for value in values {
                    let mut checked = self.session.selection.contains(column, value);
                    let label = if value.is_empty() {
                        "(blank)"
                    } else {
                        value.as_str()
                    };
                    if ui.checkbox(&mut checked, label).changed() {
                        self.session.selection.toggle(column, value);
                    }
                }
            });
    }

    fn results_view(&self, ui: &mut egui::Ui) {
        let Some(results) = self.session.results() else {
            ui.centered_and_justified(|ui| {
                ui.label("Pick regions and industries, then fetch.");
            });
            return;
        };

        if results.total_count == 0 {
            ui.label("No companies match the selected conditions.");
            return;
        }

        ui.label(format!("Total matching companies: {}", results.total_count));
        ui.add_space(4.0);

        let table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center));

        let table_with_columns = COLUMN_NAMES
            .iter()
            .fold(table, |acc, _| acc.column(Column::auto()));

        table_with_columns
            .header(20.0, |mut header| {
                for name in COLUMN_NAMES {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, results.preview.len(), |mut row| {
                    let record = &results.preview[row.index()];
                    for cell in record.cells() {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    }
}

impl eframe::App for CompanyListApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading(APP_TITLE);
                ui.separator();
                if ui.button("Fetch selection").clicked() {
                    self.on_fetch();
                }
                if ui.button("Export to Excel").clicked() {
                    self.on_export();
                }
                if ui.button("Reset selection").clicked() {
                    self.on_reset();
                }
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = &self.error {
                ui.colored_label(egui::Color32::RED, format!("Error: {err}"));
                ui.separator();
            }
            if let Some(notice) = &self.notice {
                ui.colored_label(egui::Color32::YELLOW, notice);
                ui.separator();
            }

            ui.columns(3, |cols| {
                for (ui, column) in cols.iter_mut().zip(FilterColumn::ALL) {
                    self.selection_column(ui, column);
                }
            });

            ui.separator();
            self.results_view(ui);
        });
    }
}
