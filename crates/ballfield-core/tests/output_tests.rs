use ballfield_core::config::FieldConfig;
use ballfield_core::output::{InstanceBuffers, InstanceRecord, InstanceTransform};
use ballfield_core::particle::ColorClass;
use ballfield_core::solver::{FrameInput, Solver};

#[test]
fn test_instance_transform_layout() {
    assert_eq!(std::mem::size_of::<InstanceTransform>(), 16);
    assert_eq!(InstanceTransform::HIDDEN.scale, 0.0);
}

#[test]
fn test_buffers_sized_per_color() {
    let solver = Solver::new(FieldConfig::default(), 4).unwrap();
    let buffers = InstanceBuffers::new(solver.particles());

    assert_eq!(buffers.buffer(ColorClass::Primary).len(), 31);
    assert_eq!(buffers.buffer(ColorClass::Accent).len(), 15);
    assert_eq!(buffers.bytes(ColorClass::Primary).len(), 31 * 16);
    assert_eq!(buffers.bytes(ColorClass::Accent).len(), 15 * 16);
    assert!(buffers.is_dirty(), "freshly written buffers need an upload");
}

#[test]
fn test_records_match_particles() {
    let solver = Solver::new(FieldConfig::default(), 4).unwrap();
    let buffers = InstanceBuffers::new(solver.particles());

    for p in solver.particles().iter() {
        let t = buffers.buffer(p.color)[p.render_slot as usize];
        assert_eq!(t.translation, p.position.to_array());
        assert_eq!(t.scale, p.radius);
    }
}

#[test]
fn test_inactive_particles_render_at_zero_scale() {
    let mut solver = Solver::new(FieldConfig::default(), 4).unwrap();
    let mut buffers = InstanceBuffers::new(solver.particles());
    buffers.take_dirty();

    let (color, slot) = {
        let p = solver.particles_mut().get_mut(7).unwrap();
        p.active = false;
        (p.color, p.render_slot)
    };
    buffers.write(solver.instances());

    assert_eq!(buffers.buffer(color)[slot as usize], InstanceTransform::HIDDEN);
    assert!(buffers.take_dirty());
    assert!(!buffers.take_dirty(), "take_dirty clears the flag");
}

#[test]
fn test_scatter_eventually_hides_everything() {
    let mut solver = Solver::new(FieldConfig::default(), 9).unwrap();
    let mut buffers = InstanceBuffers::new(solver.particles());
    for _ in 0..300 {
        solver.step(FrameInput::new(1.0, None, 1.0 / 60.0));
        buffers.write(solver.instances());
    }
    for color in [ColorClass::Primary, ColorClass::Accent] {
        assert!(buffers.buffer(color).iter().all(|t| t.scale == 0.0), "{color:?} still visible");
    }
}

#[test]
fn test_record_from_particle() {
    let solver = Solver::new(FieldConfig::default(), 4).unwrap();
    let p = solver.particles().get(2).unwrap();
    let record = InstanceRecord::from(p);
    assert_eq!(record.color, ColorClass::Accent);
    assert_eq!(record.render_slot, 0);
    assert_eq!(record.transform.scale, p.radius);
}
