use approx::assert_relative_eq;
use gp_kernels::prelude::*;

fn key() -> PrngKey {
    PrngKey::new(123)
}

// ============================================================================
// Parameter Set Tests
// ============================================================================

#[test]
fn test_param_set_sorted_keys() {
    let set = ParamSet::new()
        .with("variance", vec![1.0])
        .with("lengthscale", vec![0.5, 0.5]);
    let keys: Vec<&str> = set.keys().collect();
    assert_eq!(keys, vec!["lengthscale", "variance"]);
    assert_eq!(set.len(), 2);
}

#[test]
fn test_param_set_lookup() {
    let set = ParamSet::new()
        .with("lengthscale", vec![0.5])
        .with("variance", vec![2.0, 3.0]);

    assert_eq!(set.scalar("lengthscale").unwrap(), 0.5);
    assert_eq!(set.broadcast("lengthscale", 3).unwrap(), vec![0.5; 3]);
    assert_eq!(set.broadcast("variance", 2).unwrap(), vec![2.0, 3.0]);
    assert_eq!(
        set.scalar("variance").unwrap_err(),
        KernelError::InvalidParameterShape {
            name: "variance".to_string(),
            expected: 1,
            got: 2
        }
    );
    assert_eq!(
        set.require("shift").unwrap_err(),
        KernelError::MissingParameter("shift".to_string())
    );
}

#[test]
fn test_param_set_insert_overwrites() {
    let mut set = ParamSet::new().with("variance", vec![1.0]);
    assert_eq!(set.insert("variance", vec![4.0]), Some(vec![1.0]));
    assert!(set.contains("variance"));
    if let Some(v) = set.get_mut("variance") {
        v[0] = 5.0;
    }
    assert_eq!(set.get("variance"), Some(&vec![5.0]));
}

// ============================================================================
// Parameter Tree Tests
// ============================================================================

#[test]
fn test_tree_structure_errors() {
    let leaf: KernelParams<f64> = ParamSet::new().with("variance", vec![1.0]).into();
    let list = KernelParams::Combination(vec![leaf.clone(), leaf.clone()]);

    assert!(leaf.is_leaf());
    assert!(leaf.children().is_err());
    assert!(list.leaf().is_err());
    assert_eq!(list.len(), 2);
    assert!(list.get(2).is_none());
}

#[test]
fn test_tree_map_keeps_shape() {
    let kernel = RBF::<f64>::new() + Polynomial::new();
    let params = kernel.init_params(key());
    let counts = params.map(|_, values| values.len());

    assert_eq!(counts.len(), 2);
    assert_eq!(counts.get(0).unwrap().leaf().unwrap().get("lengthscale"), Some(&1));
    assert_eq!(counts.get(1).unwrap().leaf().unwrap().get("shift"), Some(&1));
}

// ============================================================================
// Bijector Tests
// ============================================================================

#[test]
fn test_softplus() {
    let b = Bijector::Softplus;
    assert_relative_eq!(b.forward(0.0_f64), 2.0_f64.ln(), epsilon = 1e-15);
    assert_relative_eq!(b.forward(50.0_f64), 50.0, epsilon = 1e-12);
    assert!(b.forward(-50.0_f64) > 0.0);

    for y in [1e-3, 0.5, 1.0, 7.0, 40.0] {
        assert_relative_eq!(b.forward(b.inverse(y)), y, max_relative = 1e-10);
    }
}

#[test]
fn test_identity_bijector() {
    assert_eq!(Bijector::Identity.forward(-3.0_f64), -3.0);
    assert_eq!(Bijector::Identity.inverse(-3.0_f64), -3.0);
    assert_eq!(Bijector::default(), Bijector::Identity);
}

#[test]
fn test_bijector_config() {
    let config = BijectorConfig::default();
    for name in BijectorConfig::POSITIVE_PARAMETERS {
        assert_eq!(config.get(name), Bijector::Softplus);
    }
    assert_eq!(config.get("test"), Bijector::Identity);

    let custom = BijectorConfig::empty()
        .transform("variance", Bijector::Softplus)
        .fallback(Bijector::Softplus);
    assert_eq!(custom.get("anything"), Bijector::Softplus);
}

#[test]
fn test_constrain_unconstrain_round_trip() {
    let kernel = Matern32::<f64>::new().active_dims([0, 1]).lengthscale(0.3).variance(2.0);
    let state = initialise(&kernel, key());

    let raw = unconstrain(&state.params, &state.bijectors).unwrap();
    let back = constrain(&raw, &state.bijectors).unwrap();

    let orig = state.params.leaf().unwrap();
    let back = back.leaf().unwrap();
    for name in ["lengthscale", "variance"] {
        let (a, b) = (orig.require(name).unwrap(), back.require(name).unwrap());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(*x, *y, max_relative = 1e-12);
        }
    }
}

#[test]
fn test_constrain_shape_mismatch() {
    let params = (RBF::<f64>::new() + RBF::new()).init_params(key());
    let bijectors = BijectorConfig::default().build(&RBF::<f64>::new().init_params(key()));
    assert!(matches!(
        constrain(&params, &bijectors),
        Err(KernelError::ParameterStructure(_))
    ));
}

// ============================================================================
// Initialisation Tests
// ============================================================================

#[test]
fn test_initialise_combination() {
    let kernel = RBF::<f64>::new() * Polynomial::new();
    let (params, trainables, bijectors) = initialise(&kernel, key()).unpack();

    assert_eq!(params.len(), 2);
    assert_eq!(trainables.len(), 2);
    assert_eq!(bijectors.len(), 2);
    assert_eq!(
        trainables.get(1).unwrap().leaf().unwrap().get("shift"),
        Some(&true)
    );
}

#[test]
fn test_initialise_with_config() {
    let kernel = RBF::<f64>::new();
    let state = initialise_with(&kernel, key(), &BijectorConfig::empty());
    let bijectors = state.bijectors.leaf().unwrap();
    assert_eq!(bijectors.get("lengthscale"), Some(&Bijector::Identity));
    assert_eq!(bijectors.get("variance"), Some(&Bijector::Identity));
}

#[test]
fn test_initialise_dtype() {
    for kernel in [
        Box::new(RBF::<f64>::new()) as Box<dyn Kernel<f64>>,
        Box::new(Matern12::<f64>::new()),
        Box::new(Matern32::<f64>::new()),
        Box::new(Matern52::<f64>::new()),
    ] {
        let (params, _, _) = initialise(&kernel, key()).unpack();
        for (_, values) in params.leaf().unwrap().iter() {
            let _: &Vec<f64> = values;
        }
    }
}

#[test]
fn test_prng_key_split() {
    let k = PrngKey::new(42);
    let (a, b) = k.split();
    assert_ne!(a, b);
    assert_eq!(k.split(), (a, b));
    assert_eq!(k.seed(), 42);
}

#[test]
fn test_prng_key_nested_splits_are_distinct() {
    for seed in 0..64 {
        let (left, right) = PrngKey::new(seed).split();
        let (ll, lr) = left.split();
        let (rl, rr) = right.split();
        assert_ne!(ll, right);
        assert_ne!(rl, left);

        let keys = [left, right, ll, lr, rl, rr];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
