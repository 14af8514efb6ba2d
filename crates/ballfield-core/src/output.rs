use crate::particle::{ColorClass, Particle, ParticleStore};

/// Per-instance transform for an instanced sphere mesh: 16 bytes, a
/// translation plus a uniform scale. Inactive particles get zero scale.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceTransform {
    pub translation: [f32; 3], // 12 bytes
    pub scale: f32,            //  4 bytes
}

impl InstanceTransform {
    pub const HIDDEN: Self = Self {
        translation: [0.0; 3],
        scale: 0.0,
    };

    pub fn from_particle(p: &Particle) -> Self {
        if !p.active {
            return Self::HIDDEN;
        }
        Self {
            translation: p.position.to_array(),
            scale: p.radius,
        }
    }
}

/// What the renderer needs for one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceRecord {
    pub color: ColorClass,
    pub render_slot: u32,
    pub transform: InstanceTransform,
}

impl From<&Particle> for InstanceRecord {
    fn from(p: &Particle) -> Self {
        Self {
            color: p.color,
            render_slot: p.render_slot,
            transform: InstanceTransform::from_particle(p),
        }
    }
}

/// One transform buffer per color class, indexed by render slot.
pub struct InstanceBuffers {
    primary: Vec<InstanceTransform>,
    accent: Vec<InstanceTransform>,
    dirty: bool,
}

impl InstanceBuffers {
    pub fn new(store: &ParticleStore) -> Self {
        let mut buffers = Self {
            primary: vec![InstanceTransform::HIDDEN; store.count_of(ColorClass::Primary)],
            accent: vec![InstanceTransform::HIDDEN; store.count_of(ColorClass::Accent)],
            dirty: false,
        };
        buffers.write(store.iter().map(InstanceRecord::from));
        buffers
    }

    /// Store every record into its slot and flag the buffers dirty.
    pub fn write<I: IntoIterator<Item = InstanceRecord>>(&mut self, records: I) {
        for record in records {
            let buffer = match record.color {
                ColorClass::Primary => &mut self.primary,
                ColorClass::Accent => &mut self.accent,
            };
            if let Some(slot) = buffer.get_mut(record.render_slot as usize) {
                *slot = record.transform;
            }
        }
        self.dirty = true;
    }

    pub fn buffer(&self, color: ColorClass) -> &[InstanceTransform] {
        match color {
            ColorClass::Primary => &self.primary,
            ColorClass::Accent => &self.accent,
        }
    }

    /// Raw bytes of one buffer, ready for upload.
    pub fn bytes(&self, color: ColorClass) -> &[u8] {
        bytemuck::cast_slice(self.buffer(color))
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the dirty flag and clear it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}
