// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Volume mount operations on container components.

use crate::model::{Devfile, VolumeMount};
use crate::{Error, Result};

#[cfg(test)]
#[path = "./volumes_test.rs"]
mod volumes_test;

const CONTAINER_COMPONENT: &str = "container component";
const VOLUME_MOUNT: &str = "volume mount";

impl Devfile {
    /// Add volume mounts to every container component named `component_name`.
    ///
    /// A mount whose path is already used in a matching container is reported
    /// as a conflict. Conflicts accumulate across components, and each
    /// component only receives the new mounts if no conflict has been found
    /// so far, so an earlier component may be updated even though a later
    /// one conflicts and the call as a whole fails.
    pub fn add_volume_mounts(
        &mut self,
        component_name: &str,
        volume_mounts: &[VolumeMount],
    ) -> Result<()> {
        let mut conflicts = Vec::new();
        let mut found = false;

        for component in self.components.iter_mut() {
            if component.name != component_name {
                continue;
            }
            let Some(container) = component.container.as_mut() else {
                continue;
            };
            found = true;

            for existing in &container.volume_mounts {
                for mount in volume_mounts {
                    if existing.path == mount.path {
                        conflicts.push(format!(
                            "unable to mount volume {}, as another volume {} is mounted to the same path {} in the container {}",
                            mount.name, existing.name, mount.path, component.name
                        ));
                    }
                }
            }
            if conflicts.is_empty() {
                tracing::debug!(
                    component = %component.name,
                    count = volume_mounts.len(),
                    "adding volume mounts"
                );
                container.volume_mounts.extend(volume_mounts.iter().cloned());
            }
        }

        if !found {
            return Err(Error::field_not_found(CONTAINER_COMPONENT, component_name));
        }
        if !conflicts.is_empty() {
            return Err(Error::VolumeMountConflict(conflicts));
        }
        Ok(())
    }

    /// Remove every mount named `name` from container components.
    ///
    /// Components that are themselves named `name` are skipped.
    // TODO: confirm whether skipping same-named components is intended; the
    // guard most likely meant to only require a container.
    pub fn delete_volume_mount(&mut self, name: &str) -> Result<()> {
        let mut found = false;

        for component in self.components.iter_mut() {
            if component.name == name {
                continue;
            }
            let Some(container) = component.container.as_mut() else {
                continue;
            };
            let before = container.volume_mounts.len();
            container.volume_mounts.retain(|m| m.name != name);
            if container.volume_mounts.len() != before {
                tracing::debug!(component = %component.name, mount = name, "removed volume mount");
                found = true;
            }
        }

        if !found {
            return Err(Error::field_not_found(VOLUME_MOUNT, name));
        }
        Ok(())
    }

    /// Path at which `component_name` mounts the volume `mount_name`.
    ///
    /// A component that exists but has no container reports the volume as
    /// not mounted rather than the component as missing.
    pub fn get_volume_mount_path(&self, mount_name: &str, component_name: &str) -> Result<String> {
        let mut component_found = false;

        for component in self.components.iter().filter(|c| c.name == component_name) {
            component_found = true;
            let Some(container) = component.container.as_ref() else {
                continue;
            };
            if let Some(mount) = container.volume_mounts.iter().find(|m| m.name == mount_name) {
                return Ok(mount.path.clone());
            }
        }

        if !component_found {
            return Err(Error::field_not_found(CONTAINER_COMPONENT, component_name));
        }
        Err(Error::NotMounted {
            mount: mount_name.to_string(),
            component: component_name.to_string(),
        })
    }
}
