mod tests {
    use myrtio_color_sampler::color::{BLACK, Rgb};
    use myrtio_color_sampler::report::{Channel, FaultChannel, QueueFull, SampleFault};
    use myrtio_color_sampler::sampler::SensorError;
    use myrtio_color_sampler::store::{
        MemoryStore, PathError, StatePath, StateStore, StateValue, StoreFull,
    };

    fn path(value: &str) -> StatePath {
        StatePath::parse(value).unwrap()
    }

    #[test]
    fn test_path_parse() {
        let parsed = path("inputs.buttons.button_left");
        assert_eq!(parsed.as_str(), "inputs.buttons.button_left");
        assert_eq!(
            parsed.segments().collect::<Vec<_>>(),
            ["inputs", "buttons", "button_left"]
        );

        assert_eq!(StatePath::parse(""), Err(PathError::Empty));
        assert_eq!(StatePath::parse("a..b"), Err(PathError::EmptySegment));
        assert_eq!(StatePath::parse(".a"), Err(PathError::EmptySegment));
        assert_eq!(StatePath::parse("a."), Err(PathError::EmptySegment));
        assert_eq!(StatePath::parse(&"x".repeat(65)), Err(PathError::TooLong));
    }

    #[test]
    fn test_path_from_segments_and_join() {
        let built = StatePath::from_segments(&["inputs", "rgb", "left"]).unwrap();
        assert_eq!(built, path("inputs.rgb.left"));
        assert_eq!(built.to_string(), "inputs.rgb.left");

        let joined = path("inputs.rgb").join("right").unwrap();
        assert_eq!(joined.as_str(), "inputs.rgb.right");

        assert_eq!(StatePath::from_segments(&[]), Err(PathError::Empty));
        assert_eq!(
            StatePath::from_segments(&["inputs", "a.b"]),
            Err(PathError::EmptySegment)
        );
        assert_eq!(path("inputs").join(""), Err(PathError::EmptySegment));
    }

    #[test]
    fn test_memory_store_set_get() {
        let store = MemoryStore::<4>::new();
        let color = path("inputs.rgb.left");
        assert!(store.is_empty());
        assert_eq!(store.get(&color), None);

        store.init_path(&color, BLACK.into()).unwrap();
        assert_eq!(store.get(&color), Some(StateValue::Color(BLACK)));

        store.set(&color, Rgb::new(1, 2, 3).into()).unwrap();
        assert_eq!(
            store.get(&color).and_then(StateValue::as_color),
            Some(Rgb::new(1, 2, 3))
        );
        assert_eq!(store.len(), 1);

        assert_eq!(store.remove(&color), Some(StateValue::Color(Rgb::new(1, 2, 3))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_enable_signal() {
        let store = MemoryStore::<4>::new();
        let button = path("inputs.buttons.left");

        assert!(!store.is_enabled(&button));
        store.set(&button, true.into()).unwrap();
        assert!(store.is_enabled(&button));
        store.set(&button, false.into()).unwrap();
        assert!(!store.is_enabled(&button));

        // Non-flag values don't enable anything
        store.set(&button, BLACK.into()).unwrap();
        assert!(!store.is_enabled(&button));
    }

    #[test]
    fn test_memory_store_full() {
        let store = MemoryStore::<2>::new();
        store.set(&path("a"), true.into()).unwrap();
        store.set(&path("b"), true.into()).unwrap();

        assert_eq!(
            store.set(&path("c"), true.into()),
            Err(StoreFull(path("c")))
        );
        assert_eq!(
            store.init_path(&path("c"), BLACK.into()),
            Err(StoreFull(path("c")))
        );
        assert_eq!(store.get(&path("c")), None);

        // Overwriting an existing path still works
        assert_eq!(store.set(&path("a"), false.into()), Ok(()));
        assert_eq!(store.len(), 2);
    }

    fn fault(slot: usize, error: SensorError<u8>) -> SampleFault<u8> {
        SampleFault {
            slot,
            sensor: "left".try_into().unwrap(),
            error,
        }
    }

    #[test]
    fn test_fault_channel_fifo() {
        let channel = FaultChannel::<u8, 4>::new();
        let sender = channel.sender();
        let receiver = channel.receiver();

        assert!(channel.is_empty());
        sender.try_send(fault(0, SensorError::Read(1))).unwrap();
        sender.try_send(fault(1, SensorError::Led(2))).unwrap();
        assert_eq!(channel.len(), 2);

        let first = receiver.try_receive().unwrap();
        assert_eq!(first.slot, 0);
        assert_eq!(first.error, SensorError::Read(1));
        assert_eq!(first.error.cause(), Some(&1));

        let second = receiver.try_receive().unwrap();
        assert_eq!(second.error, SensorError::Led(2));
        assert_eq!(receiver.try_receive(), None);
    }

    #[test]
    fn test_fault_channel_full() {
        let channel = FaultChannel::<u8, 1>::new();
        channel.try_send(fault(0, SensorError::Acquire(7))).unwrap();

        let rejected = fault(1, SensorError::IntegrationTime(8));
        assert_eq!(channel.try_send(rejected.clone()), Err(QueueFull(rejected)));
        assert_eq!(channel.len(), 1);
        assert_eq!(channel.try_receive().map(|fault| fault.slot), Some(0));
    }

    #[test]
    fn test_publish_error_has_no_driver_cause() {
        let error = SensorError::<u8>::Publish(StoreFull(path("inputs.rgb.left")));
        assert_eq!(error.cause(), None);
    }

    #[test]
    fn test_channel_carries_any_value() {
        let channel = Channel::<u32, 2>::new();
        let receiver = channel.receiver();
        channel.sender().try_send(1).unwrap();
        channel.sender().try_send(2).unwrap();
        assert_eq!(channel.try_send(3), Err(QueueFull(3)));
        assert_eq!(receiver.len(), 2);
        assert_eq!(receiver.try_receive(), Some(1));
        assert_eq!(receiver.try_receive(), Some(2));
        assert!(receiver.is_empty());
    }
}
