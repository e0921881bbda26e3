// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A two-thread demo of the frame core: a logic loop publishing a moving
//! scene while the render thread consumes and records draw commands.

use anyhow::Result;
use ember_agents::{RenderAgent, RenderThread, SceneAgent, ScenePart};
use ember_core::animation::AnimationProvider;
use ember_core::asset::{
    AssetProvider, AssetResolutionError, MaterialRecord, MeshRef, TextureRef, ToonSettingsRecord,
};
use ember_core::frame::{FrameSwapContext, GameObjectId};
use ember_core::math::{Aabb, Mat4, Vec3};
use ember_core::renderer::{
    DeviceResourceRegistry, GpuMeshInfo, MeshHandle, ResourceUnavailableError, TextureHandle,
};
use ember_lanes::config::RendererSettings;
use ember_lanes::descriptor_lane::{MaterialResolver, PartDescriptorBuilder};
use ember_lanes::render_lane::{CommandSink, DrawCommand};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Serves one authored PBR material and resolves every path in place.
struct DemoAssets;

impl AssetProvider for DemoAssets {
    fn resolve_path(&self, reference: &str) -> Result<String, AssetResolutionError> {
        Ok(format!("assets/{reference}"))
    }

    fn load_material(&self, reference: &str) -> Result<MaterialRecord, AssetResolutionError> {
        match reference {
            "materials/crate.mat" => Ok(MaterialRecord {
                base_color_texture: "textures/crate_albedo.png".into(),
                roughness_factor: 0.8,
                ..Default::default()
            }),
            _ => Err(AssetResolutionError::NotFound {
                reference: reference.into(),
            }),
        }
    }

    fn load_material_settings(
        &self,
        reference: &str,
    ) -> Result<ToonSettingsRecord, AssetResolutionError> {
        Err(AssetResolutionError::NotFound {
            reference: reference.into(),
        })
    }
}

/// Hands out sequential handles; everything is always resident.
#[derive(Default)]
struct DemoRegistry {
    next: AtomicU64,
}

impl DeviceResourceRegistry for DemoRegistry {
    fn resolve_mesh(&self, _mesh: &MeshRef) -> Result<GpuMeshInfo, ResourceUnavailableError> {
        Ok(GpuMeshInfo {
            handle: MeshHandle(self.next.fetch_add(1, Ordering::Relaxed)),
            bounds: Aabb::UNIT,
            expected_joint_count: 0,
        })
    }

    fn resolve_texture(
        &self,
        _texture: &TextureRef,
    ) -> Result<TextureHandle, ResourceUnavailableError> {
        Ok(TextureHandle(self.next.fetch_add(1, Ordering::Relaxed)))
    }
}

/// Counts recorded mesh draws in place of a GPU backend.
struct CountingSink {
    draws: Arc<AtomicU64>,
}

impl CommandSink for CountingSink {
    fn submit(&mut self, command: DrawCommand) {
        if matches!(command, DrawCommand::Mesh { .. }) {
            self.draws.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// The demo scene has no skeletal animation.
struct NoAnimation;

impl AnimationProvider for NoAnimation {
    fn current_pose(&self, _object: GameObjectId) -> Option<Vec<Mat4>> {
        None
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let swap = Arc::new(FrameSwapContext::new());

    // Render side on its own thread.
    let draws = Arc::new(AtomicU64::new(0));
    let mut render_agent = RenderAgent::new(
        swap.clone(),
        Arc::new(DemoRegistry::default()),
        RendererSettings::default(),
    );
    render_agent.set_camera(
        Mat4::look_at_rh(Vec3::new(0.0, 2.0, 6.0), Vec3::ZERO, Vec3::Y)
            .expect("camera pose is sane"),
    );
    let render_thread = RenderThread::spawn(
        render_agent,
        CountingSink {
            draws: draws.clone(),
        },
        Duration::from_millis(16),
    );

    // Logic side stays here: one textured crate orbiting the origin.
    let builder = PartDescriptorBuilder::new(MaterialResolver::new(Arc::new(DemoAssets)));
    let mut scene = SceneAgent::new(builder, Arc::new(NoAnimation), swap);
    let crate_id = scene.spawn(
        vec![ScenePart {
            mesh: "meshes/crate.mesh".into(),
            material_ref: "materials/crate.mat".into(),
        }],
        Mat4::IDENTITY,
    );

    for tick in 0..120u32 {
        let angle = tick as f32 * 0.05;
        scene.set_local_transform(
            crate_id,
            Mat4::from_translation(Vec3::new(angle.cos() * 3.0, 0.0, angle.sin() * 3.0)),
        );
        scene.tick();
        std::thread::sleep(Duration::from_millis(8));
    }

    render_thread.shutdown()?;
    log::info!(
        "Demo finished: {} mesh draws recorded",
        draws.load(Ordering::Relaxed)
    );
    Ok(())
}
