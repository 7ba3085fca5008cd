//! In-memory entity store
//!
//! Stands in for the persistence layer: validated CRUD over projects,
//! safety functions, components, and failure modes, cascade deletion, and
//! snapshot extraction for the calculation engine. Iteration order is
//! insertion order throughout so snapshots are deterministic.

use crate::asil::AsilLevel;
use crate::classification::FailureClassification;
use crate::model::{
    Component, ComponentRecord, EntityId, FailureMode, Project, ProjectSnapshot, SafetyFunction,
    ValidationError,
};
use crate::{FmedaError, FmedaResult};
use chrono::Utc;
use indexmap::IndexMap;

/// Store holding all analysis entities
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: IndexMap<EntityId, Project>,
    safety_functions: IndexMap<EntityId, SafetyFunction>,
    components: IndexMap<EntityId, Component>,
    failure_modes: IndexMap<EntityId, FailureMode>,
    next_id: EntityId,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Create a project; a zero lifetime is accepted and treated as
    /// "not yet set" by the calculator
    pub fn create_project(&mut self, name: &str, lifetime_hours: f64) -> FmedaResult<EntityId> {
        Self::validate_project(name, lifetime_hours)?;
        let id = self.alloc_id();
        let now = Utc::now();
        self.projects.insert(
            id,
            Project {
                id,
                name: name.trim().to_string(),
                lifetime_hours,
                created_at: now,
                modified_at: now,
            },
        );
        tracing::debug!(id, name, "created project");
        Ok(id)
    }

    pub fn project(&self, id: EntityId) -> FmedaResult<&Project> {
        self.projects.get(&id).ok_or(FmedaError::UnknownProject(id))
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn update_project(
        &mut self,
        id: EntityId,
        name: &str,
        lifetime_hours: f64,
    ) -> FmedaResult<()> {
        Self::validate_project(name, lifetime_hours)?;
        let project = self
            .projects
            .get_mut(&id)
            .ok_or(FmedaError::UnknownProject(id))?;
        project.name = name.trim().to_string();
        project.lifetime_hours = lifetime_hours;
        project.modified_at = Utc::now();
        Ok(())
    }

    /// Delete a project and everything it owns
    pub fn delete_project(&mut self, id: EntityId) -> FmedaResult<()> {
        self.projects
            .shift_remove(&id)
            .ok_or(FmedaError::UnknownProject(id))?;
        self.safety_functions.retain(|_, sf| sf.project_id != id);
        let dead_components: Vec<EntityId> = self
            .components
            .values()
            .filter(|c| c.project_id == id)
            .map(|c| c.id)
            .collect();
        self.components.retain(|_, c| c.project_id != id);
        self.failure_modes
            .retain(|_, fm| !dead_components.contains(&fm.component_id));
        tracing::debug!(id, "deleted project and owned entities");
        Ok(())
    }

    /// Remove every entity in the store
    pub fn clear_all(&mut self) {
        self.projects.clear();
        self.safety_functions.clear();
        self.components.clear();
        self.failure_modes.clear();
        tracing::info!("cleared all stored entities");
    }

    fn validate_project(name: &str, lifetime_hours: f64) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyProjectName);
        }
        if lifetime_hours < 0.0 {
            return Err(ValidationError::NegativeLifetime(lifetime_hours));
        }
        Ok(())
    }

    // ========================================================================
    // Safety functions
    // ========================================================================

    pub fn create_safety_function(
        &mut self,
        project_id: EntityId,
        sf_id: &str,
        description: &str,
        target: AsilLevel,
    ) -> FmedaResult<EntityId> {
        self.project(project_id)?;
        self.check_sf_id_unique(project_id, sf_id, None)?;
        let id = self.alloc_id();
        self.safety_functions.insert(
            id,
            SafetyFunction {
                id,
                project_id,
                sf_id: sf_id.to_string(),
                description: description.to_string(),
                target_integrity_level: target,
                related_components: Vec::new(),
            },
        );
        tracing::debug!(id, sf_id, "created safety function");
        Ok(id)
    }

    pub fn safety_function(&self, id: EntityId) -> FmedaResult<&SafetyFunction> {
        self.safety_functions
            .get(&id)
            .ok_or(FmedaError::UnknownSafetyFunction(id))
    }

    pub fn update_safety_function(
        &mut self,
        id: EntityId,
        sf_id: &str,
        description: &str,
        target: AsilLevel,
    ) -> FmedaResult<()> {
        let project_id = self.safety_function(id)?.project_id;
        self.check_sf_id_unique(project_id, sf_id, Some(id))?;
        let sf = self
            .safety_functions
            .get_mut(&id)
            .ok_or(FmedaError::UnknownSafetyFunction(id))?;
        sf.sf_id = sf_id.to_string();
        sf.description = description.to_string();
        sf.target_integrity_level = target;
        Ok(())
    }

    pub fn delete_safety_function(&mut self, id: EntityId) -> FmedaResult<()> {
        self.safety_functions
            .shift_remove(&id)
            .ok_or(FmedaError::UnknownSafetyFunction(id))?;
        Ok(())
    }

    /// Replace the set of components a safety function depends on
    pub fn set_related_components(
        &mut self,
        safety_function: EntityId,
        components: &[EntityId],
    ) -> FmedaResult<()> {
        let project_id = self.safety_function(safety_function)?.project_id;
        for &component in components {
            let comp = self.component(component)?;
            if comp.project_id != project_id {
                return Err(ValidationError::CrossProjectLink {
                    component,
                    safety_function,
                }
                .into());
            }
        }
        let sf = self
            .safety_functions
            .get_mut(&safety_function)
            .ok_or(FmedaError::UnknownSafetyFunction(safety_function))?;
        sf.related_components = components.to_vec();
        Ok(())
    }

    fn check_sf_id_unique(
        &self,
        project_id: EntityId,
        sf_id: &str,
        exclude: Option<EntityId>,
    ) -> Result<(), ValidationError> {
        let clash = self.safety_functions.values().any(|sf| {
            sf.project_id == project_id && sf.sf_id == sf_id && Some(sf.id) != exclude
        });
        if clash {
            return Err(ValidationError::DuplicateSafetyFunctionId(
                sf_id.to_string(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Components
    // ========================================================================

    pub fn create_component(
        &mut self,
        project_id: EntityId,
        comp_id: &str,
        component_type: &str,
        failure_rate: f64,
        is_safety_related: bool,
    ) -> FmedaResult<EntityId> {
        self.project(project_id)?;
        if failure_rate < 0.0 {
            return Err(ValidationError::NegativeFailureRate(failure_rate).into());
        }
        self.check_comp_id_unique(project_id, comp_id, None)?;
        let id = self.alloc_id();
        self.components.insert(
            id,
            Component {
                id,
                project_id,
                comp_id: comp_id.to_string(),
                component_type: component_type.to_string(),
                failure_rate,
                is_safety_related,
            },
        );
        tracing::debug!(id, comp_id, failure_rate, "created component");
        Ok(id)
    }

    pub fn component(&self, id: EntityId) -> FmedaResult<&Component> {
        self.components
            .get(&id)
            .ok_or(FmedaError::UnknownComponent(id))
    }

    pub fn update_component(
        &mut self,
        id: EntityId,
        comp_id: &str,
        component_type: &str,
        failure_rate: f64,
        is_safety_related: bool,
    ) -> FmedaResult<()> {
        if failure_rate < 0.0 {
            return Err(ValidationError::NegativeFailureRate(failure_rate).into());
        }
        let project_id = self.component(id)?.project_id;
        self.check_comp_id_unique(project_id, comp_id, Some(id))?;
        let component = self
            .components
            .get_mut(&id)
            .ok_or(FmedaError::UnknownComponent(id))?;
        component.comp_id = comp_id.to_string();
        component.component_type = component_type.to_string();
        component.failure_rate = failure_rate;
        component.is_safety_related = is_safety_related;
        Ok(())
    }

    /// Delete a component, its failure modes, and any links to it
    pub fn delete_component(&mut self, id: EntityId) -> FmedaResult<()> {
        self.components
            .shift_remove(&id)
            .ok_or(FmedaError::UnknownComponent(id))?;
        self.failure_modes.retain(|_, fm| fm.component_id != id);
        for sf in self.safety_functions.values_mut() {
            sf.related_components.retain(|&c| c != id);
        }
        Ok(())
    }

    fn check_comp_id_unique(
        &self,
        project_id: EntityId,
        comp_id: &str,
        exclude: Option<EntityId>,
    ) -> Result<(), ValidationError> {
        let clash = self.components.values().any(|c| {
            c.project_id == project_id && c.comp_id == comp_id && Some(c.id) != exclude
        });
        if clash {
            return Err(ValidationError::DuplicateComponentId(comp_id.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Failure modes
    // ========================================================================

    pub fn create_failure_mode(
        &mut self,
        component_id: EntityId,
        description: &str,
        failure_rate_total: f64,
        system_level_effect: &str,
        classification: FailureClassification,
    ) -> FmedaResult<EntityId> {
        self.component(component_id)?;
        self.validate_failure_mode(
            component_id,
            description,
            failure_rate_total,
            &classification,
            None,
        )?;
        let id = self.alloc_id();
        let now = Utc::now();
        self.failure_modes.insert(
            id,
            FailureMode {
                id,
                component_id,
                description: description.to_string(),
                failure_rate_total,
                system_level_effect: system_level_effect.to_string(),
                classification,
                created_at: now,
                modified_at: now,
            },
        );
        tracing::debug!(id, description, "created failure mode");
        Ok(id)
    }

    pub fn failure_mode(&self, id: EntityId) -> FmedaResult<&FailureMode> {
        self.failure_modes
            .get(&id)
            .ok_or(FmedaError::UnknownFailureMode(id))
    }

    pub fn update_failure_mode(
        &mut self,
        id: EntityId,
        description: &str,
        failure_rate_total: f64,
        system_level_effect: &str,
        classification: FailureClassification,
    ) -> FmedaResult<()> {
        let component_id = self.failure_mode(id)?.component_id;
        self.validate_failure_mode(
            component_id,
            description,
            failure_rate_total,
            &classification,
            Some(id),
        )?;
        let mode = self
            .failure_modes
            .get_mut(&id)
            .ok_or(FmedaError::UnknownFailureMode(id))?;
        mode.description = description.to_string();
        mode.failure_rate_total = failure_rate_total;
        mode.system_level_effect = system_level_effect.to_string();
        mode.classification = classification;
        mode.modified_at = Utc::now();
        Ok(())
    }

    pub fn delete_failure_mode(&mut self, id: EntityId) -> FmedaResult<()> {
        self.failure_modes
            .shift_remove(&id)
            .ok_or(FmedaError::UnknownFailureMode(id))?;
        Ok(())
    }

    fn validate_failure_mode(
        &self,
        component_id: EntityId,
        description: &str,
        failure_rate_total: f64,
        classification: &FailureClassification,
        exclude: Option<EntityId>,
    ) -> FmedaResult<()> {
        if failure_rate_total < 0.0 {
            return Err(ValidationError::NegativeFailureRate(failure_rate_total).into());
        }
        classification.validate()?;
        let clash = self.failure_modes.values().any(|fm| {
            fm.component_id == component_id
                && fm.description.eq_ignore_ascii_case(description)
                && Some(fm.id) != exclude
        });
        if clash {
            let comp_id = self
                .component(component_id)
                .map(|c| c.comp_id.clone())
                .unwrap_or_default();
            return Err(
                ValidationError::DuplicateDescription(description.to_string(), comp_id).into(),
            );
        }
        Ok(())
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Materialize the immutable input set for one project
    pub fn snapshot(&self, project_id: EntityId) -> FmedaResult<ProjectSnapshot> {
        let project = self.project(project_id)?.clone();
        let safety_functions = self
            .safety_functions
            .values()
            .filter(|sf| sf.project_id == project_id)
            .cloned()
            .collect();
        let components = self
            .components
            .values()
            .filter(|c| c.project_id == project_id)
            .map(|c| ComponentRecord {
                component: c.clone(),
                failure_modes: self
                    .failure_modes
                    .values()
                    .filter(|fm| fm.component_id == c.id)
                    .cloned()
                    .collect(),
            })
            .collect();
        Ok(ProjectSnapshot {
            project,
            safety_functions,
            components,
        })
    }
}
