// ── Form session ──
//
// Holds the values being edited and the active section. The YAML
// section edits the remote model as text; that text only reaches the
// values through `apply_yaml`. Switching back to a guided section
// without applying discards it.

use tracing::debug;

use super::field::Section;
use super::mapper::{from_remote_model, to_remote_model};
use super::reducer::{FormEdit, reduce};
use super::validate::{FieldError, validate};
use super::values::NetworkFormValues;
use super::visibility::{self, FormRender};
use crate::error::CoreError;
use crate::model::{RemoteNetworkModel, ServerSettings};

#[derive(Debug, Clone)]
pub struct FormSession {
    values: NetworkFormValues,
    section: Section,
    yaml: Option<String>,
}

impl FormSession {
    pub fn new(values: NetworkFormValues) -> Self {
        Self {
            values,
            section: Section::Details,
            yaml: None,
        }
    }

    pub fn values(&self) -> &NetworkFormValues {
        &self.values
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Unapplied YAML text, present only while the YAML section is active.
    pub fn yaml(&self) -> Option<&str> {
        self.yaml.as_deref()
    }

    /// Switch sections. Entering YAML renders the current model; leaving
    /// it drops whatever text was not applied.
    pub fn set_section(&mut self, section: Section) -> Result<(), CoreError> {
        if section == Section::Yaml {
            if self.section != Section::Yaml {
                self.yaml = Some(serde_yaml::to_string(&to_remote_model(&self.values))?);
            }
        } else if self.yaml.take().is_some() {
            debug!("leaving YAML section, unapplied edits discarded");
        }
        self.section = section;
        Ok(())
    }

    pub fn edit(&mut self, edit: FormEdit) {
        self.values = reduce(std::mem::take(&mut self.values), edit);
    }

    /// Replace the YAML text. Ignored outside the YAML section and on
    /// read-only forms.
    pub fn set_yaml(&mut self, text: impl Into<String>) {
        if self.section == Section::Yaml && !self.values.read_only {
            self.yaml = Some(text.into());
        }
    }

    /// Parse the YAML text back into form values.
    ///
    /// The form's flags are kept, and so is the name unless creating.
    pub fn apply_yaml(&mut self) -> Result<(), CoreError> {
        let Some(text) = self.yaml.as_deref() else {
            return Ok(());
        };
        let model: RemoteNetworkModel = serde_yaml::from_str(text)?;
        let mut values = from_remote_model(&model)?;
        values.read_only = self.values.read_only;
        values.is_creating = self.values.is_creating;
        if !values.is_creating {
            values.name.clone_from(&self.values.name);
            values.network_type = self.values.network_type;
        }
        self.values = values;
        Ok(())
    }

    pub fn render(&self, settings: Option<&ServerSettings>) -> FormRender {
        visibility::render(self.section, &self.values, settings)
    }

    pub fn validate(&self, settings: Option<&ServerSettings>) -> Vec<FieldError> {
        validate(&self.values, settings)
    }

    /// The model to submit: the YAML text while editing YAML, otherwise
    /// the mapped form values.
    pub fn submit_model(&self) -> Result<RemoteNetworkModel, CoreError> {
        match &self.yaml {
            Some(text) => {
                let mut model: RemoteNetworkModel = serde_yaml::from_str(text)?;
                if !self.values.is_creating {
                    model.name.clone_from(&self.values.name);
                }
                Ok(model)
            }
            None => Ok(to_remote_model(&self.values)),
        }
    }
}
