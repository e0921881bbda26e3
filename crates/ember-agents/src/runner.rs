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

//! Hosts the render agent on its own thread.
//!
//! The render thread and the logic thread each advance at their own cadence;
//! the swap context is their only shared state. There is no cancellation of
//! an in-flight frame — a frame that started runs to completion, and frames
//! that never started are simply dropped at teardown.

use crate::render_agent::RenderAgent;
use anyhow::anyhow;
use crossbeam_channel::{bounded, Sender};
use ember_lanes::render_lane::CommandSink;
use std::thread::JoinHandle;
use std::time::Duration;

/// A running render thread.
pub struct RenderThread {
    shutdown: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl RenderThread {
    /// Spawns the render loop at `frame_interval` cadence.
    ///
    /// The agent and sink move onto the thread; control returns immediately.
    pub fn spawn(
        mut agent: RenderAgent,
        mut sink: impl CommandSink + Send + 'static,
        frame_interval: Duration,
    ) -> Self {
        let (shutdown, rx) = bounded::<()>(1);
        let handle = std::thread::Builder::new()
            .name("ember-render".into())
            .spawn(move || {
                loop {
                    match rx.recv_timeout(frame_interval) {
                        Ok(()) | Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
                        Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                            agent.render_frame(&mut sink);
                        }
                    }
                }
                log::info!("Render thread stopped after {} frames", agent.frame_count());
            })
            .expect("failed to spawn the render thread");

        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    /// Signals shutdown and joins the thread.
    ///
    /// A frame in flight completes; nothing further starts.
    pub fn shutdown(mut self) -> anyhow::Result<()> {
        // The receiver may already be gone if the thread exited on its own.
        let _ = self.shutdown.send(());
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| anyhow!("render thread panicked")),
            None => Ok(()),
        }
    }
}

impl Drop for RenderThread {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.shutdown.send(());
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::asset::{MeshRef, TextureRef};
    use ember_core::frame::FrameSwapContext;
    use ember_core::math::Aabb;
    use ember_core::renderer::{
        DeviceResourceRegistry, GpuMeshInfo, MeshHandle, ResourceUnavailableError, TextureHandle,
    };
    use ember_lanes::config::RendererSettings;
    use ember_lanes::render_lane::DrawCommand;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    struct StubRegistry;

    impl DeviceResourceRegistry for StubRegistry {
        fn resolve_mesh(&self, _mesh: &MeshRef) -> Result<GpuMeshInfo, ResourceUnavailableError> {
            Ok(GpuMeshInfo {
                handle: MeshHandle(0),
                bounds: Aabb::UNIT,
                expected_joint_count: 0,
            })
        }
        fn resolve_texture(
            &self,
            _texture: &TextureRef,
        ) -> Result<TextureHandle, ResourceUnavailableError> {
            Ok(TextureHandle(0))
        }
    }

    struct CountingSink(Arc<AtomicU64>);

    impl CommandSink for CountingSink {
        fn submit(&mut self, _command: DrawCommand) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn render_thread_runs_frames_and_shuts_down_cleanly() {
        let swap = Arc::new(FrameSwapContext::new());
        let agent = RenderAgent::new(swap, Arc::new(StubRegistry), RendererSettings::default());

        let submitted = Arc::new(AtomicU64::new(0));
        let thread = RenderThread::spawn(
            agent,
            CountingSink(submitted.clone()),
            Duration::from_millis(1),
        );

        // Give the loop a few frames of an empty scene (post passes still
        // record fullscreen work), then stop it.
        std::thread::sleep(Duration::from_millis(20));
        thread.shutdown().expect("clean shutdown");
        assert!(submitted.load(Ordering::Relaxed) > 0);
    }
}
