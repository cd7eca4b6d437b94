//! Various utility macros

#[macro_export]
macro_rules! target_named (
    ($makefile:expr, $name:expr) => {{
        let name = $name;
        $makefile
            .target(name)
            .expect(&format!("Target named {:?} should have been extracted", name))
    }}
);

#[macro_export]
macro_rules! variable_set_to (
    ($makefile:expr, $variable_name:expr, $value:expr) => {{
        let variable_name = $variable_name;
        assert_eq!(
            $makefile
                .variables()
                .get(variable_name)
                .expect(&format!("Variable named {:?} should have a value", variable_name)),
            $value
        )
    }}
);
