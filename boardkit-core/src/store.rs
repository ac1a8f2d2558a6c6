/// Single source of truth for the project/column/ticket graph and settings.
///
/// Every mutation leaves the graph satisfying the structural invariants
/// (unique ids, exclusive ownership, meaningful list order) and ends with
/// one full save through the document store. Operations referencing an
/// unknown id are silent no-ops that skip the save; callers are expected to
/// hold ids from a current read. Persistence failures propagate with the
/// in-memory mutation already applied, so the right recovery is to retry
/// the save, not to recompute the mutation.

use crate::storage::{DocumentStore, StorageError};
use crate::tasks::{extract_task_text, TodoTask};
use crate::types::{generate_id, BoardData, Column, Project, Ticket, TicketLocation};

pub struct BoardStore {
    data: BoardData,
    store: Box<dyn DocumentStore>,
}

/// Partial update for [`BoardStore::update_ticket`]: only supplied fields change.
#[derive(Debug, Clone, Default)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl BoardStore {
    /// Open the store over whatever the document store currently holds.
    /// A missing or partial payload decodes leniently (see [`BoardData::from_raw`]).
    pub fn open(store: Box<dyn DocumentStore>) -> Result<Self, StorageError> {
        let data = match store.load()? {
            Some(raw) => BoardData::from_raw(&raw),
            None => BoardData::default(),
        };
        Ok(Self { data, store })
    }

    fn save(&self) -> Result<(), StorageError> {
        self.store.save(&self.data)
    }

    pub fn data(&self) -> &BoardData {
        &self.data
    }

    pub fn projects(&self) -> &[Project] {
        &self.data.projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.data.projects.iter().find(|p| p.id == id)
    }

    pub fn column(&self, project_id: &str, col_id: &str) -> Option<&Column> {
        self.project(project_id)?.columns.iter().find(|c| c.id == col_id)
    }

    fn project_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.data.projects.iter_mut().find(|p| p.id == id)
    }

    fn column_mut(&mut self, project_id: &str, col_id: &str) -> Option<&mut Column> {
        self.project_mut(project_id)?
            .columns
            .iter_mut()
            .find(|c| c.id == col_id)
    }

    /// Create a project seeded with the configured default columns and
    /// append it to the project list.
    pub fn create_project(&mut self, name: &str) -> Result<Project, StorageError> {
        let columns = self
            .data
            .settings
            .default_columns
            .iter()
            .map(|col_name| Column {
                id: generate_id("col"),
                name: col_name.clone(),
                tickets: Vec::new(),
            })
            .collect();
        let project = Project {
            id: generate_id("project"),
            name: name.to_string(),
            columns,
        };
        log::info!("[boardkit.store] Created project {:?} ({})", project.name, project.id);
        self.data.projects.push(project.clone());
        self.save()?;
        Ok(project)
    }

    /// Delete a project and everything nested under it. If it was the
    /// last-selected project, the selection moves to the new first project
    /// (or clears when none remain).
    pub fn delete_project(&mut self, id: &str) -> Result<(), StorageError> {
        let before = self.data.projects.len();
        self.data.projects.retain(|p| p.id != id);
        if self.data.projects.len() == before {
            return Ok(());
        }
        if self.data.settings.last_project_id.as_deref() == Some(id) {
            self.data.settings.last_project_id =
                self.data.projects.first().map(|p| p.id.clone());
        }
        log::info!("[boardkit.store] Deleted project {}", id);
        self.save()
    }

    pub fn rename_project(&mut self, id: &str, name: &str) -> Result<(), StorageError> {
        match self.project_mut(id) {
            Some(project) => {
                project.name = name.to_string();
                self.save()
            }
            None => Ok(()),
        }
    }

    /// Append a new empty column. Returns `None` when the project is unknown.
    pub fn add_column(
        &mut self,
        project_id: &str,
        name: &str,
    ) -> Result<Option<Column>, StorageError> {
        let Some(project) = self.project_mut(project_id) else {
            return Ok(None);
        };
        let column = Column {
            id: generate_id("col"),
            name: name.to_string(),
            tickets: Vec::new(),
        };
        project.columns.push(column.clone());
        self.save()?;
        Ok(Some(column))
    }

    /// Delete a column and its tickets.
    pub fn delete_column(&mut self, project_id: &str, col_id: &str) -> Result<(), StorageError> {
        let Some(project) = self.project_mut(project_id) else {
            return Ok(());
        };
        let before = project.columns.len();
        project.columns.retain(|c| c.id != col_id);
        if project.columns.len() == before {
            return Ok(());
        }
        self.save()
    }

    pub fn rename_column(
        &mut self,
        project_id: &str,
        col_id: &str,
        name: &str,
    ) -> Result<(), StorageError> {
        match self.column_mut(project_id, col_id) {
            Some(column) => {
                column.name = name.to_string();
                self.save()
            }
            None => Ok(()),
        }
    }

    /// Move the column at `from` to `to` within the project's column list.
    ///
    /// Index policy: an out-of-range `from` is a no-op; `to` is clamped to
    /// the valid insertion range after removal.
    pub fn reorder_columns(
        &mut self,
        project_id: &str,
        from: usize,
        to: usize,
    ) -> Result<(), StorageError> {
        let Some(project) = self.project_mut(project_id) else {
            return Ok(());
        };
        if from >= project.columns.len() {
            return Ok(());
        }
        let column = project.columns.remove(from);
        let to = to.min(project.columns.len());
        project.columns.insert(to, column);
        self.save()
    }

    /// Append a new ticket to a column. Returns `None` when the column is
    /// unknown.
    pub fn add_ticket(
        &mut self,
        project_id: &str,
        col_id: &str,
        title: &str,
        description: &str,
        source_note: Option<&str>,
    ) -> Result<Option<Ticket>, StorageError> {
        let Some(column) = self.column_mut(project_id, col_id) else {
            return Ok(None);
        };
        let ticket = Ticket {
            id: generate_id("ticket"),
            title: title.to_string(),
            description: description.to_string(),
            source_note: source_note.map(str::to_string),
        };
        column.tickets.push(ticket.clone());
        self.save()?;
        Ok(Some(ticket))
    }

    /// Apply a partial update to a ticket; unsupplied fields are untouched.
    pub fn update_ticket(
        &mut self,
        project_id: &str,
        col_id: &str,
        ticket_id: &str,
        patch: TicketPatch,
    ) -> Result<(), StorageError> {
        let Some(column) = self.column_mut(project_id, col_id) else {
            return Ok(());
        };
        let Some(ticket) = column.tickets.iter_mut().find(|t| t.id == ticket_id) else {
            return Ok(());
        };
        if let Some(title) = patch.title {
            ticket.title = title;
        }
        if let Some(description) = patch.description {
            ticket.description = description;
        }
        self.save()
    }

    pub fn delete_ticket(
        &mut self,
        project_id: &str,
        col_id: &str,
        ticket_id: &str,
    ) -> Result<(), StorageError> {
        let Some(column) = self.column_mut(project_id, col_id) else {
            return Ok(());
        };
        let before = column.tickets.len();
        column.tickets.retain(|t| t.id != ticket_id);
        if column.tickets.len() == before {
            return Ok(());
        }
        self.save()
    }

    /// Move a ticket from one column to another (or within one column, which
    /// is an in-column reorder).
    ///
    /// `position` is interpreted after the ticket has been removed from the
    /// source list and clamped to the destination's insertion range, so a
    /// same-column move needs no index adjustment by the caller.
    pub fn move_ticket(
        &mut self,
        project_id: &str,
        ticket_id: &str,
        from_col_id: &str,
        to_col_id: &str,
        position: usize,
    ) -> Result<(), StorageError> {
        let Some(project) = self.project_mut(project_id) else {
            return Ok(());
        };
        let Some(from_idx) = project.columns.iter().position(|c| c.id == from_col_id) else {
            return Ok(());
        };
        let Some(to_idx) = project.columns.iter().position(|c| c.id == to_col_id) else {
            return Ok(());
        };
        let Some(ticket_idx) = project.columns[from_idx]
            .tickets
            .iter()
            .position(|t| t.id == ticket_id)
        else {
            return Ok(());
        };

        let ticket = project.columns[from_idx].tickets.remove(ticket_idx);
        let dest = &mut project.columns[to_idx].tickets;
        let position = position.min(dest.len());
        dest.insert(position, ticket);
        self.save()
    }

    /// Scan the project's columns in order for the first occurrence of the
    /// ticket. `None` when the project or ticket is unknown.
    pub fn find_ticket_location(
        &self,
        project_id: &str,
        ticket_id: &str,
    ) -> Option<TicketLocation> {
        let project = self.project(project_id)?;
        for column in &project.columns {
            if let Some(index) = column.tickets.iter().position(|t| t.id == ticket_id) {
                return Some(TicketLocation {
                    col_id: column.id.clone(),
                    index,
                });
            }
        }
        None
    }

    pub fn set_last_project_id(&mut self, id: Option<&str>) -> Result<(), StorageError> {
        self.data.settings.last_project_id = id.map(str::to_string);
        self.save()
    }

    pub fn set_todo_file_path(&mut self, path: &str) -> Result<(), StorageError> {
        self.data.settings.todo_file_path = path.to_string();
        self.save()
    }

    pub fn set_default_columns(&mut self, columns: Vec<String>) -> Result<(), StorageError> {
        self.data.settings.default_columns = columns;
        self.save()
    }

    /// Pick the project the board should show: a still-existing `current`
    /// wins, then a still-existing last-selected project, then the first
    /// project. Read-only; callers persist the choice via
    /// [`set_last_project_id`](Self::set_last_project_id).
    pub fn resolve_active_project(&self, current: Option<&str>) -> Option<String> {
        if let Some(id) = current {
            if self.project(id).is_some() {
                return Some(id.to_string());
            }
        }
        if let Some(id) = self.data.settings.last_project_id.as_deref() {
            if self.project(id).is_some() {
                return Some(id.to_string());
            }
        }
        self.data.projects.first().map(|p| p.id.clone())
    }

    /// Bulk-import task lines into a column: one ticket per task, title from
    /// the line's checkbox text, blank titles skipped, every ticket stamped
    /// with the originating note. One save for the whole batch.
    pub fn import_tasks(
        &mut self,
        project_id: &str,
        col_id: &str,
        tasks: &[TodoTask],
        source_note: Option<&str>,
    ) -> Result<Vec<Ticket>, StorageError> {
        let Some(column) = self.column_mut(project_id, col_id) else {
            return Ok(Vec::new());
        };
        let mut created = Vec::new();
        for task in tasks {
            let title = extract_task_text(&task.text);
            if title.is_empty() {
                continue;
            }
            let ticket = Ticket {
                id: generate_id("ticket"),
                title,
                description: String::new(),
                source_note: source_note.map(str::to_string),
            };
            column.tickets.push(ticket.clone());
            created.push(ticket);
        }
        if created.is_empty() {
            return Ok(created);
        }
        log::info!(
            "[boardkit.store] Imported {} tasks into column {}",
            created.len(),
            col_id
        );
        self.save()?;
        Ok(created)
    }
}

/// Split a comma-separated column list as entered in the settings panel,
/// trimming whitespace and dropping empty entries.
pub fn parse_default_columns(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
