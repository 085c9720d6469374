use crate::{
    canvas::Surface,
    color::Color,
    particle::Shape,
    simulation::SpaceSimulation,
};
use ultraviolet::Vec2;

/// Flat particle record a host can read straight out of memory.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
    /// 0 = star, 1 = asteroid.
    pub shape: u8,
    pub color: Color,
}

/// Simulation plus the snapshot buffer exposed to the host.
#[derive(Debug)]
pub struct Host {
    pub sim: SpaceSimulation,
    pub views: Vec<ParticleView>,
}

impl Host {
    pub fn snapshot(&mut self) -> usize {
        self.views.clear();
        self.views.extend(self.sim.particles.iter().map(|p| ParticleView {
            x: p.pos.x,
            y: p.pos.y,
            radius: p.radius,
            opacity: p.opacity(),
            shape: p.shape as u8,
            color: p.color,
        }));
        self.views.len()
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn SpaceSimulation_Create(width: f32, height: f32, seed: u64) -> *mut Host {
    let surface = Surface::new(width, height);
    match SpaceSimulation::with_config(Default::default(), surface, seed) {
        Ok(sim) => Box::into_raw(Box::new(Host { sim, views: Vec::new() })),
        Err(err) => {
            log::error!("cannot create simulation: {err}");
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn SpaceSimulation_Destroy(handle: *mut Host) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn SpaceSimulation_Update(handle: *mut Host) {
    if let Some(host) = unsafe { handle.as_mut() } {
        host.sim.update();
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn SpaceSimulation_Resize(handle: *mut Host, width: f32, height: f32) {
    if let Some(host) = unsafe { handle.as_mut() } {
        let surface = Surface::new(width, height);
        if surface.is_valid() {
            host.sim.resize(surface);
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn SpaceSimulation_SetPointer(handle: *mut Host, x: f32, y: f32) {
    if let Some(host) = unsafe { handle.as_mut() } {
        host.sim.set_pointer(Some(Vec2::new(x, y)));
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn SpaceSimulation_ClearPointer(handle: *mut Host) {
    if let Some(host) = unsafe { handle.as_mut() } {
        host.sim.set_pointer(None);
    }
}

/// `kind` is 0 for a star, 1 for an asteroid. Returns whether a particle was added.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn SpaceSimulation_AddParticle(handle: *mut Host, x: f32, y: f32, kind: u8) -> bool {
    match (unsafe { handle.as_mut() }, Shape::from_u8(kind)) {
        (Some(host), Some(shape)) => host.sim.add_particle(x, y, shape),
        _ => false,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn SpaceSimulation_Click(handle: *mut Host, x: f32, y: f32) -> bool {
    unsafe { handle.as_mut() }.is_some_and(|host| host.sim.click(x, y))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn SpaceSimulation_GetParticleCount(handle: *const Host) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |host| host.sim.particles.len())
}

/// Refreshes the particle snapshot and returns its length.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn SpaceSimulation_SnapshotParticles(handle: *mut Host) -> usize {
    unsafe { handle.as_mut() }.map_or(0, Host::snapshot)
}

/// Pointer to the last snapshot; valid until the next snapshot or destroy.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn SpaceSimulation_GetParticleViews(handle: *const Host) -> *const ParticleView {
    unsafe { handle.as_ref() }.map_or(std::ptr::null(), |host| host.views.as_ptr())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_lifecycle() {
        unsafe {
            let handle = SpaceSimulation_Create(800.0, 600.0, 3);
            assert!(!handle.is_null());
            assert_eq!(SpaceSimulation_GetParticleCount(handle), 350);

            assert!(SpaceSimulation_AddParticle(handle, 10.0, 10.0, 1));
            assert!(!SpaceSimulation_AddParticle(handle, 10.0, 10.0, 9));
            SpaceSimulation_SetPointer(handle, 400.0, 300.0);
            SpaceSimulation_Update(handle);
            SpaceSimulation_Resize(handle, 1024.0, 768.0);

            let count = SpaceSimulation_SnapshotParticles(handle);
            assert_eq!(count, 351);
            let views = std::slice::from_raw_parts(SpaceSimulation_GetParticleViews(handle), count);
            assert_eq!(views[350].shape, Shape::Asteroid as u8);
            assert!(views[350].opacity < 1.0);

            SpaceSimulation_Destroy(handle);
        }
    }

    #[test]
    fn null_handles_are_ignored() {
        unsafe {
            let null = std::ptr::null_mut();
            SpaceSimulation_Update(null);
            SpaceSimulation_Destroy(null);
            assert!(!SpaceSimulation_Click(null, 1.0, 1.0));
            assert_eq!(SpaceSimulation_GetParticleCount(null), 0);
            assert!(SpaceSimulation_GetParticleViews(null).is_null());
        }
    }

    #[test]
    fn invalid_surface_yields_null() {
        unsafe {
            assert!(SpaceSimulation_Create(f32::NAN, 10.0, 0).is_null());
        }
    }
}
