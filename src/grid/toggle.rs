//! Bulk checkbox/radio toggle over the highlighted selection.

use crate::column::ColumnType;
use crate::events::{GridEvent, HistoryAction, HistoryEntry};
use crate::grid::{EditContext, Grid};
use crate::value::CellValue;

impl Grid {
    /// Flip every checkbox/radio cell in the highlighted selection, as one
    /// atomic change: one history entry for the whole batch, one
    /// after-changes notification. Cells in other column types are skipped;
    /// an empty batch records nothing.
    pub fn toggle_selection(&mut self, ctx: &mut EditContext<'_>) {
        let mut records = Vec::new();

        for pos in self.highlighted.clone() {
            let toggleable = matches!(
                self.columns.get(pos.x).map(|c| c.kind),
                Some(ColumnType::Checkbox | ColumnType::Radio)
            );
            if !toggleable {
                continue;
            }
            let flipped = !self.value(pos).truthy();
            records.push(self.update_cell(pos, CellValue::Bool(flipped)));
        }

        if records.is_empty() {
            return;
        }

        ctx.history.record(HistoryEntry {
            action: HistoryAction::SetValue,
            records: records.clone(),
            selection: self.highlighted.clone(),
        });
        ctx.events.emit(GridEvent::AfterChanges { records });
    }
}
