mod tests {
    use myrtio_color_sampler::config::{
        ConfigError, DEFAULT_INTEGRATION_TIME_MS, DEFAULT_SETTLE_MS, DEFAULT_TICK_MS,
        SamplerConfig, SamplerTimings, SensorConfig,
    };

    fn sensor(name: &str, enable: &str) -> SensorConfig {
        SensorConfig::new(name, "/dev/i2c-1", "P9_25", "P9_27", enable).unwrap()
    }

    #[test]
    fn test_default_config_is_left_right_pair() {
        let config = SamplerConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.sensors.len(), 2);

        let left = &config.sensors[0];
        assert_eq!(left.name.as_str(), "color_left");
        assert_eq!(left.bus.as_str(), "/dev/i2c-2");
        assert_eq!(left.led_pin.as_str(), "P9_23");
        assert_eq!(left.irq_pin.as_str(), "P9_15");
        assert_eq!(left.enable.as_str(), "inputs.buttons.button_left");

        let right = &config.sensors[1];
        assert_eq!(right.name.as_str(), "color_right");
        assert_eq!(right.enable.as_str(), "inputs.buttons.button_right");

        assert_eq!(
            left.output_path(&config.name).unwrap().as_str(),
            "inputs.color_sensors.color_left"
        );
    }

    #[test]
    fn test_default_timings() {
        let timings = SamplerTimings::default();
        assert_eq!(timings.tick_ms, DEFAULT_TICK_MS);
        assert_eq!(timings.tick_ms, 500);
        assert_eq!(timings.settle_ms, DEFAULT_SETTLE_MS);
        assert_eq!(timings.settle_ms, 250);
        assert_eq!(timings.integration_time_ms, DEFAULT_INTEGRATION_TIME_MS);
        assert_eq!(timings.tick().as_millis(), 500);
    }

    #[test]
    fn test_validate_sensor_count() {
        let mut config = SamplerConfig::default();
        config.sensors.pop();
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotEnoughSensors { found: 1 })
        );

        config.sensors.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotEnoughSensors { found: 0 })
        );

        let mut config = SamplerConfig::default();
        config.sensors.push(sensor("extra", "inputs.x")).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManySensors { found: 3 })
        );
    }

    #[test]
    fn test_validate_names() {
        let config = SamplerConfig::new("rgb", sensor("same", "a.b"), sensor("same", "a.c")).unwrap();
        assert_eq!(config.validate(), Err(ConfigError::DuplicateName));

        let config = SamplerConfig::new("rgb", sensor("", "a.b"), sensor("b", "a.c")).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidName { slot: Some(0) })
        );

        let config =
            SamplerConfig::new("rgb", sensor("a", "a.b"), sensor("left.b", "a.c")).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidName { slot: Some(1) })
        );

        let config = SamplerConfig::new("", sensor("a", "a.b"), sensor("b", "a.c")).unwrap();
        assert_eq!(config.validate(), Err(ConfigError::InvalidName { slot: None }));
    }

    #[test]
    fn test_validate_enable_path() {
        for enable in ["", "inputs..left", ".inputs", "inputs."] {
            let config =
                SamplerConfig::new("rgb", sensor("a", "inputs.a"), sensor("b", enable)).unwrap();
            assert_eq!(
                config.validate(),
                Err(ConfigError::MalformedEnablePath { slot: 1 }),
                "{enable:?}"
            );
        }
    }

    #[test]
    fn test_validate_zero_tick() {
        let config = SamplerConfig::default().with_timings(SamplerTimings {
            tick_ms: 0,
            ..SamplerTimings::default()
        });
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickPeriod));
    }

    #[test]
    fn test_value_too_long() {
        let name = "a".repeat(40);
        assert_eq!(
            SensorConfig::new(&name, "bus", "P1", "P2", "x.y"),
            Err(ConfigError::ValueTooLong)
        );
    }

    #[test]
    fn test_from_json() {
        let json = br#"{
            "name": "rgb",
            "sensors": [
                {"name": "front", "bus": "/dev/i2c-2", "led_pin": "P9_23", "irq_pin": "P9_15", "enable": "inputs.buttons.front"},
                {"name": "back", "bus": "/dev/i2c-1", "led_pin": "P9_25", "irq_pin": "P9_27", "enable": "inputs.buttons.back"}
            ],
            "timings": {"tick_ms": 1000}
        }"#;

        let config = SamplerConfig::from_json(json).unwrap();
        assert_eq!(config.name.as_str(), "rgb");
        assert_eq!(config.sensors[0].name.as_str(), "front");
        assert_eq!(config.sensors[1].bus.as_str(), "/dev/i2c-1");
        assert_eq!(config.timings.tick_ms, 1000);
        assert_eq!(config.timings.settle_ms, DEFAULT_SETTLE_MS);
    }

    #[test]
    fn test_from_json_uses_defaults() {
        let json = br#"{"sensors": [
            {"name": "a", "bus": "b0", "led_pin": "L0", "irq_pin": "I0", "enable": "e.a"},
            {"name": "b", "bus": "b1", "led_pin": "L1", "irq_pin": "I1", "enable": "e.b"}
        ]}"#;

        let config = SamplerConfig::from_json(json).unwrap();
        assert_eq!(config.name.as_str(), "color_sensors");
        assert_eq!(config.timings, SamplerTimings::default());
    }

    #[test]
    fn test_from_json_rejects_invalid_input() {
        assert_eq!(SamplerConfig::from_json(b"{"), Err(ConfigError::Parse));
        assert_eq!(
            SamplerConfig::from_json(br#"{"sensors": []}"#),
            Err(ConfigError::NotEnoughSensors { found: 0 })
        );
    }

    #[test]
    fn test_from_json_counts_every_sensor() {
        let sensor = r#"{"name": "s", "bus": "b", "led_pin": "L", "irq_pin": "I", "enable": "e.s"}"#;
        for count in [3, 4, 5, 8] {
            let json = format!("{{\"sensors\": [{}]}}", vec![sensor; count].join(","));
            assert_eq!(
                SamplerConfig::from_json(json.as_bytes()),
                Err(ConfigError::TooManySensors { found: count }),
                "{count} sensors"
            );
        }
    }
}
