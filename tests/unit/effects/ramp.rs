use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn clamps_outside_stops() {
    let r = Ramp::linear(0.92, 1.0, 1.0, 0.0).unwrap();
    assert_eq!(r.sample(0.0), 1.0);
    assert_eq!(r.sample(0.92), 1.0);
    assert!(approx(r.sample(0.96), 0.5));
    assert_eq!(r.sample(1.0), 0.0);
    assert_eq!(r.sample(2.0), 0.0);
}

#[test]
fn three_stop_ramp_holds_then_falls() {
    let r = Ramp::new(&[0.0, 0.4, 0.55], &[1.0, 1.0, 0.0]).unwrap();
    assert_eq!(r.sample(0.2), 1.0);
    assert_eq!(r.sample(0.4), 1.0);
    assert!(approx(r.sample(0.475), 0.5));
    assert_eq!(r.sample(0.6), 0.0);
}

#[test]
fn pixel_inputs_work_like_progress() {
    let r = Ramp::linear(0.0, 400.0, 0.0, -50.0).unwrap();
    assert!(approx(r.sample(200.0), -25.0));
    assert_eq!(r.sample(-10.0), 0.0);
    assert_eq!(r.sample(1000.0), -50.0);
}

#[test]
fn nan_reads_first_output() {
    let r = Ramp::linear(0.0, 1.0, 3.0, 7.0).unwrap();
    assert_eq!(r.sample(f64::NAN), 3.0);
}

#[test]
fn coincident_stops_jump() {
    let r = Ramp::new(&[0.0, 0.5, 0.5, 1.0], &[0.0, 0.0, 1.0, 1.0]).unwrap();
    assert_eq!(r.sample(0.49), 0.0);
    assert_eq!(r.sample(0.5), 1.0);
    assert_eq!(r.sample(0.75), 1.0);
}

#[test]
fn invalid_ramps_are_rejected() {
    assert!(Ramp::new(&[], &[]).is_err());
    assert!(Ramp::new(&[0.0, 1.0], &[0.0]).is_err());
    assert!(Ramp::new(&[1.0, 0.0], &[0.0, 1.0]).is_err());
    assert!(Ramp::new(&[0.0, f64::INFINITY], &[0.0, 1.0]).is_err());
}

#[test]
fn serde_uses_input_output_arrays() {
    let r: Ramp = serde_json::from_str(r#"{"input":[0.35,0.5],"output":[0,1]}"#).unwrap();
    assert_eq!(r, Ramp::linear(0.35, 0.5, 0.0, 1.0).unwrap());
    let back = serde_json::to_value(&r).unwrap();
    assert_eq!(back["input"][1], 0.5);
    assert!(serde_json::from_str::<Ramp>(r#"{"input":[1,0],"output":[0,1]}"#).is_err());
}
