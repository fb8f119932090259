use chemist::{
    AOBasisSet, Access, AtomicBasisSet, BasisCenterView, Charges, ChemistError, CollectionView,
    ContractedGaussian, ContractedGaussianView, FieldStorage, Layout, Nuclei, NucleiView,
    Nucleus, NucleusView, Point, PointCharge, PointChargeView, PointSet, PointView,
    PrimitiveView, ReadOnly, ReadWrite, RecordView, Shell, ShellType, ShellView,
};
use proptest::prelude::*;
use proptest::sample::Index;
use std::rc::Rc;

fn scenario_nuclei() -> Nuclei {
    Nuclei::from_records([
        Nucleus::new("H", 1, 1.0, Point::new(0.0, 0.0, 0.0)),
        Nucleus::new("He", 2, 4.0, Point::new(0.0, 0.0, 1.0)),
        Nucleus::new("Li", 3, 7.0, Point::new(0.0, 0.0, 2.0)),
    ])
    .unwrap()
}

// Const propagation is checked by the compiler: these only type-check if the
// nested views of a read-only view are read-only too.
const _: () = assert!(!ReadOnly::IS_MUTABLE);
const _: () = assert!(ReadWrite::IS_MUTABLE);

fn nested_point_of<'v, 'a>(view: &'v NucleusView<'a, ReadOnly>) -> &'v PointView<'a, ReadOnly> {
    view.point_charge().point()
}

fn nested_primitive_of<'v>(view: &'v ShellView<'_, ReadOnly>) -> PrimitiveView<'v, ReadOnly> {
    view.primitive(0).unwrap()
}

fn contraction_of<'v, 'a>(
    view: &'v ShellView<'a, ReadOnly>,
) -> &'v ContractedGaussianView<'a, ReadOnly> {
    view.contracted_gaussian()
}

fn center_shell_of<'v>(view: &'v mut BasisCenterView<'_, ReadOnly>) -> ShellView<'v, ReadOnly> {
    view.shell_mut(0).unwrap()
}

fn read_only_ref_is_shared<'a>(r: <ReadOnly as Access>::Ref<'a, f64>) -> &'a f64 {
    r
}

fn read_write_ref_is_exclusive<'a>(r: <ReadWrite as Access>::Ref<'a, f64>) -> &'a mut f64 {
    r
}

fn assert_copy<T: Copy>(_: &T) {}

#[test]
fn read_only_views_propagate_their_access_mode_to_nested_views() {
    let nucleus = Nucleus::new("He", 2, 4.0, Point::new(1.0, 2.0, 3.0));
    let view = NucleusView::from(&nucleus);
    assert_copy(&view);
    assert_eq!(nested_point_of(&view).y(), Ok(2.0));

    let shell = Shell::new(
        ShellType::Pure,
        0,
        ContractedGaussian::new(vec![1.0], vec![0.5], Point::default()).unwrap(),
    );
    let shell_view = ShellView::from(&shell);
    assert_eq!(nested_primitive_of(&shell_view).exponent(), Ok(0.5));
    assert_eq!(contraction_of(&shell_view).len(), 1);

    let basis =
        AOBasisSet::from_records([AtomicBasisSet::from_records([shell]).unwrap()]).unwrap();
    let mut center = basis.at(0).unwrap();
    assert_eq!(center_shell_of(&mut center).l(), Ok(0));

    let mut value = 1.0;
    *read_write_ref_is_exclusive(&mut value) = 2.0;
    assert_eq!(*read_only_ref_is_shared(&value), 2.0);
}

#[test]
fn writes_through_one_element_view_are_seen_by_another() {
    let mut nuclei = scenario_nuclei();
    nuclei.at_mut(1).unwrap().set_mass(4.0026).unwrap();
    let first = nuclei.at(1).unwrap();
    let second = nuclei.at(1).unwrap();
    assert_eq!(first.mass(), Ok(4.0026));
    assert_eq!(second.mass(), Ok(4.0026));
    assert_eq!(first, second);
}

#[test]
fn element_view_copies_alias_while_collection_copies_own_their_layout() {
    let nuclei = scenario_nuclei();
    let element = nuclei.at(0).unwrap();
    let element_copy = element;
    assert_eq!(element, element_copy);

    let view = nuclei.view().subset([2, 0]).unwrap();
    let copy = view.clone();
    let members = |v: &NucleiView<'_>| v.layout().as_subset().unwrap().members().as_ptr();
    assert_ne!(members(&view), members(&copy));
    assert!(Rc::ptr_eq(
        view.layout().as_subset().unwrap().supersystem(),
        copy.layout().as_subset().unwrap().supersystem()
    ));

    // A narrower copy leaves the original's bookkeeping alone.
    let narrowed = copy.into_subset([1]).unwrap();
    assert_eq!(narrowed.len(), 1);
    assert_eq!(view.len(), 2);
}

#[test]
fn field_writes_through_a_reborrowed_collection_are_seen_by_the_original() {
    let mut nuclei = scenario_nuclei();
    let mut view = nuclei.view_mut().into_subset([2, 0]).unwrap();
    {
        let mut copy = view.reborrow();
        copy.at_mut(1).unwrap().set_name("D").unwrap();
    }
    assert_eq!(view.at(1).unwrap().name(), Ok("D"));
    assert_eq!(nuclei.names()[0], "D");
}

#[test]
fn contiguous_and_subset_views_of_the_same_records_are_equal() {
    let nuclei = scenario_nuclei();
    let contiguous = nuclei.view();
    let subset = nuclei.view().subset([0, 1, 2]).unwrap();
    assert!(contiguous.layout().as_contiguous().is_some());
    assert!(subset.layout().as_subset().is_some());
    assert_eq!(contiguous, subset);
    assert_eq!(subset, contiguous);

    // The supersystem object does not matter, only its contents.
    let other = scenario_nuclei();
    let from_other = other.view().subset([2, 0]).unwrap();
    assert_eq!(nuclei.view().subset([2, 0]).unwrap(), from_other);
}

#[test]
fn materialized_records_are_independent_copies() {
    let mut nuclei = scenario_nuclei();
    let mut owned = nuclei.at(2).unwrap().materialize().unwrap();
    assert_eq!(NucleusView::from(&owned), nuclei.at(2).unwrap());

    owned.mass = 100.0;
    assert_eq!(nuclei.masses()[2], 7.0);

    nuclei.at_mut(2).unwrap().set_mass(6.94).unwrap();
    assert_eq!(owned.mass, 100.0);
}

#[test]
fn boundary_indices_on_a_three_element_storage() {
    let set = PointSet::from_records([
        Point::new(1.0, 0.0, 0.0),
        Point::new(2.0, 0.0, 0.0),
        Point::new(3.0, 0.0, 0.0),
    ])
    .unwrap();
    assert_eq!(
        set.at(set.len()).unwrap_err(),
        ChemistError::OutOfRange { index: 3, len: 3 }
    );
    assert_eq!(set.at(set.len() - 1).unwrap().x(), Ok(3.0));
    assert_eq!(
        set.view().at(3).unwrap_err(),
        ChemistError::OutOfRange { index: 3, len: 3 }
    );
}

#[test]
fn subset_scenario_selects_lithium_then_hydrogen() {
    let nuclei = scenario_nuclei();
    let subset = nuclei.view().subset([2, 0]).unwrap();

    assert_eq!(subset.len(), 2);
    assert_eq!(
        subset.at(0).unwrap(),
        Nucleus::new("Li", 3, 7.0, Point::new(0.0, 0.0, 2.0))
    );
    assert_eq!(
        subset.at(1).unwrap(),
        Nucleus::new("H", 1, 1.0, Point::new(0.0, 0.0, 0.0))
    );

    let copy = subset.clone();
    assert_eq!(copy, subset);
    let original_members = subset.layout().as_subset().unwrap().members();
    let copy_members = copy.layout().as_subset().unwrap().members();
    assert_eq!(original_members, copy_members);
    assert_ne!(original_members.as_ptr(), copy_members.as_ptr());
}

#[test]
fn null_views_reject_access() {
    let record: NucleusView<'_, ReadWrite> = NucleusView::default();
    assert_eq!(record.name(), Err(ChemistError::NullView));

    let collection: CollectionView<'_, Charges> = CollectionView::default();
    assert!(collection.is_null());
    assert_eq!(collection.at(0).unwrap_err(), ChemistError::NullView);
    assert_eq!(Layout::default().resolve(0), Err(ChemistError::NullView));
}

#[test]
fn bulk_field_data_of_an_empty_storage_is_empty() {
    let charges = Charges::new();
    assert!(charges.charge_data().is_empty());
    assert!(charges.points().x().is_empty());
    assert_eq!(charges.view(), Charges::new());
}

#[test]
fn storages_round_trip_through_serde() {
    let nuclei = scenario_nuclei();
    let text = toml::to_string(&Wrapper { nuclei: nuclei.clone() }).unwrap();
    let back: Wrapper = toml::from_str(&text).unwrap();
    assert_eq!(back.nuclei, nuclei);
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Wrapper {
    nuclei: Nuclei,
}

fn arb_points() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-1e3..1e3f64, -1e3..1e3f64, -1e3..1e3f64), 1..20)
        .prop_map(|coords| {
            coords
                .into_iter()
                .map(|(x, y, z)| Point::new(x, y, z))
                .collect()
        })
}

proptest! {
    #[test]
    fn every_row_reads_back_what_was_pushed(points in arb_points()) {
        let set = PointSet::from_records(points.clone()).unwrap();
        prop_assert_eq!(set.len(), points.len());
        for (index, point) in points.iter().enumerate() {
            prop_assert_eq!(set.at(index).unwrap(), *point);
        }
        prop_assert!(set.at(points.len()).is_err());
    }

    #[test]
    fn writes_through_at_mut_are_visible_through_at(
        points in arb_points(),
        index in any::<Index>(),
        value in -1e3..1e3f64,
    ) {
        let mut set = PointSet::from_records(points).unwrap();
        let index = index.index(set.len());
        set.at_mut(index).unwrap().set_y(value).unwrap();
        prop_assert_eq!(set.at(index).unwrap().y(), Ok(value));
        prop_assert_eq!(set.y()[index], value);
    }

    #[test]
    fn subset_views_match_the_selected_records(
        points in arb_points(),
        picks in prop::collection::vec(any::<Index>(), 0..12),
    ) {
        let set = PointSet::from_records(points.clone()).unwrap();
        let members: Vec<usize> = picks.iter().map(|pick| pick.index(points.len())).collect();
        let subset = set.view().subset(members.iter().copied()).unwrap();
        let expected = PointSet::from_records(members.iter().map(|&m| points[m])).unwrap();

        prop_assert_eq!(subset.len(), members.len());
        prop_assert_eq!(&subset, &expected);
        prop_assert_eq!(subset.materialize().unwrap(), expected.clone());
        prop_assert_eq!(&subset, &expected.view());
    }

    #[test]
    fn identity_subset_equals_the_contiguous_view(points in arb_points()) {
        let set = PointSet::from_records(points.clone()).unwrap();
        let identity = set.view().subset(0..points.len()).unwrap();
        prop_assert_eq!(&identity, &set.view());
    }

    #[test]
    fn materialized_point_charges_round_trip(
        points in arb_points(),
        charge in -5.0..5.0f64,
        index in any::<Index>(),
    ) {
        let charges = Charges::from_records(
            points.iter().map(|&point| PointCharge::new(charge, point))
        ).unwrap();
        let index = index.index(charges.len());
        let view = charges.at(index).unwrap();
        let owned = view.materialize().unwrap();
        prop_assert_eq!(PointChargeView::from(&owned), view);
    }
}
