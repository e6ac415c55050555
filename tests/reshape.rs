//! Displacement conversion, grid lifecycle, and snapshot behavior.


use glam::Vec3;
use multires_reshape::{
    ensure_grids, Error, GridCoord, Mesh, MeshTopology, MultiresReshapeContext, PTexCoord, Subdiv,
    SubdivCcg, SubdivSettings,
};
use test_utils::*;

/// The object-space sample the tests pretend some earlier operation wrote
/// into the grids: the limit position plus a coordinate-dependent offset.
fn expected_object_position(context: &MultiresReshapeContext<'_>, coord: &GridCoord) -> Vec3 {
    let (position, _) = context.evaluate_limit_at_grid(coord);
    position + Vec3::new(0.05 * coord.u, -0.1 * coord.v, 0.2)
}

#[test]
fn construction_requires_displacement_layer() {
    let mesh = Mesh::new(MeshTopology::new(&[4]).unwrap());
    let result =
        MultiresReshapeContext::from_modifier(&mesh, &modifier(2, 2), Box::new(FlatPatchEvaluator));
    assert!(matches!(result, Err(Error::MissingDisplacementLayer)));

    // Same if the layer existed once but was removed.
    let mut mesh = mesh_with_displacement(&[4]);
    mesh.remove_displacement_layer();
    let result =
        MultiresReshapeContext::from_modifier(&mesh, &modifier(2, 2), Box::new(FlatPatchEvaluator));
    assert!(matches!(result, Err(Error::MissingDisplacementLayer)));
}

#[test]
fn modifier_reshape_level_is_clamped() {
    assert_eq!(modifier(0, 3).reshape_level(), 1);
    assert_eq!(modifier(2, 3).reshape_level(), 2);
    assert_eq!(modifier(5, 3).reshape_level(), 3);
}

#[test]
fn ccg_context_borrows_subdiv() {
    let mesh = mesh_with_displacement(&[4, 3]);
    let subdiv = Subdiv::new_from_mesh(
        SubdivSettings::default(),
        mesh.topology(),
        Box::new(FlatPatchEvaluator),
    )
    .unwrap();
    let ccg = SubdivCcg::new(subdiv, 1);

    let context = MultiresReshapeContext::from_ccg(&mesh, &ccg, 2).unwrap();
    assert_eq!(context.reshape().level, 1);
    assert_eq!(context.top().level, 2);
    assert!(std::ptr::eq(context.subdiv(), ccg.subdiv()));
    assert_eq!(ccg.grid_size(), 3);
    assert_eq!(context.subdiv().settings(), SubdivSettings::default());
}

#[test]
fn subdivide_context_levels() {
    let mesh = mesh_with_displacement(&[4]);
    let context = MultiresReshapeContext::from_subdivide(
        &mesh,
        &modifier(1, 2),
        3,
        Box::new(FlatPatchEvaluator),
    )
    .unwrap();

    // Existing data lives at the modifier's total level; the new top is
    // the level being subdivided to.
    assert_eq!(context.reshape().level, 2);
    assert_eq!(context.top().level, 3);
    assert_eq!(context.top().grid_size, 9);
}

#[test]
fn ensure_grids_is_monotonic() {
    let mut mesh = mesh_with_displacement(&[4, 5]);
    mesh.ensure_paint_mask_layer();
    ensure_grids(&mut mesh, 2);

    for (i, grid) in mesh.displacement_grids_mut().unwrap().iter_mut().enumerate() {
        for (j, value) in grid.data_mut().iter_mut().enumerate() {
            *value = Vec3::new(i as f32, j as f32, 0.0);
        }
    }
    let before = mesh.displacement_grids().unwrap().to_vec();

    // At or below the stored level nothing is touched.
    ensure_grids(&mut mesh, 1);
    ensure_grids(&mut mesh, 2);
    assert_eq!(mesh.displacement_grids().unwrap(), &before[..]);

    // Growing reallocates zeroed at the new level.
    ensure_grids(&mut mesh, 3);
    for grid in mesh.displacement_grids().unwrap() {
        assert_eq!(grid.level(), 3);
        assert_eq!(grid.data().len(), 81);
        assert!(grid.data().iter().all(|&value| value == Vec3::ZERO));
    }
    for grid in mesh.paint_mask_grids().unwrap() {
        assert_eq!(grid.level(), 3);
        assert_eq!(grid.data().len(), 81);
    }
}

#[test]
fn grid_element_resolves_layers() {
    let mut mesh = mesh_with_displacement(&[4]);
    mesh.ensure_paint_mask_layer();
    ensure_grids(&mut mesh, 2);
    let context = context_for(&mesh, 2, 2);

    let coord = GridCoord {
        grid_index: 1,
        u: 1.0,
        v: 0.5,
    };
    let element = context.grid_element_for_grid_coord(&mut mesh, &coord);
    *element.displacement.unwrap() = Vec3::new(1.0, 2.0, 3.0);
    *element.mask.unwrap() = 0.5;

    // Cell (4, 2) of a 5×5 grid.
    assert_eq!(
        mesh.displacement_grids().unwrap()[1].data()[14],
        Vec3::new(1.0, 2.0, 3.0)
    );
    assert_eq!(mesh.paint_mask_grids().unwrap()[1].data()[14], 0.5);
}

#[test]
fn grid_element_mask_is_absent_without_layer() {
    let mut mesh = mesh_with_displacement(&[4]);
    mesh.ensure_paint_mask_layer();
    mesh.remove_paint_mask_layer();
    ensure_grids(&mut mesh, 1);
    let context = context_for(&mesh, 1, 1);

    let element = context.grid_element_for_grid_coord(
        &mut mesh,
        &GridCoord {
            grid_index: 0,
            u: 0.0,
            v: 0.0,
        },
    );
    assert!(element.displacement.is_some());
    assert!(element.mask.is_none());
}

#[test]
fn grid_element_for_ptex_coord_matches_grid_coord() {
    let mut mesh = mesh_with_displacement(&[4]);
    ensure_grids(&mut mesh, 2);
    let context = context_for(&mesh, 2, 2);

    let ptex_coord = PTexCoord {
        ptex_face_index: 0,
        u: 0.25,
        v: 0.25,
    };
    let element = context.grid_element_for_ptex_coord(&mut mesh, &ptex_coord);
    *element.displacement.unwrap() = Vec3::splat(7.0);

    let grid_coord = context.ptex_coord_to_grid(&ptex_coord);
    let element = context.grid_element_for_grid_coord(&mut mesh, &grid_coord);
    assert_eq!(*element.displacement.unwrap(), Vec3::splat(7.0));
}

#[test]
fn traversal_visits_every_cell_once() {
    let mut mesh = mesh_with_displacement(&[4, 3]);
    ensure_grids(&mut mesh, 1);
    let context = context_for(&mesh, 1, 1);

    context.foreach_grid_coordinate(&mut mesh, 1, |_, element| {
        *element.displacement.unwrap() += Vec3::ONE;
    });

    for grid in mesh.displacement_grids().unwrap() {
        assert!(grid.data().iter().all(|&value| value == Vec3::ONE));
    }
}

#[test]
fn displacement_round_trip_is_idempotent() {
    let mut mesh = mesh_with_displacement(&[4, 3, 5]);
    ensure_grids(&mut mesh, 2);
    let context = context_for(&mesh, 2, 2);

    context.foreach_grid_coordinate(&mut mesh, 2, |coord, element| {
        *element.displacement.unwrap() = expected_object_position(&context, coord);
    });

    context.object_grids_to_tangent_displacement(&mut mesh);
    context.object_grids_from_tangent_displacement(&mut mesh);

    context.foreach_grid_coordinate(&mut mesh, 2, |coord, element| {
        let expected = expected_object_position(&context, coord);
        let actual = *element.displacement.unwrap();
        assert!(
            (actual - expected).length() < 1e-4,
            "at {:?}: {:?} vs {:?}",
            coord,
            actual,
            expected
        );
    });
}

#[test]
fn orig_snapshot_propagates_through_current_surface() {
    let mut mesh = mesh_with_displacement(&[4]);
    ensure_grids(&mut mesh, 2);
    let mut context = context_for(&mesh, 2, 2);

    // Live grids hold object-space samples; convert to the canonical
    // tangent-space convention and snapshot that state.
    context.foreach_grid_coordinate(&mut mesh, 2, |coord, element| {
        *element.displacement.unwrap() = expected_object_position(&context, coord);
    });
    context.object_grids_to_tangent_displacement(&mut mesh);
    context.store_original_grids(&mesh);

    // Trash the live grids, then rebuild them from the snapshot.
    context.foreach_grid_coordinate(&mut mesh, 2, |_, element| {
        *element.displacement.unwrap() = Vec3::splat(99.0);
    });
    context.object_grids_from_orig_tangent_displacement(&mut mesh);

    context.foreach_grid_coordinate(&mut mesh, 2, |coord, element| {
        let expected = expected_object_position(&context, coord);
        let actual = *element.displacement.unwrap();
        assert!(
            (actual - expected).length() < 1e-4,
            "at {:?}: {:?} vs {:?}",
            coord,
            actual,
            expected
        );
    });
}

#[test]
fn original_snapshot_is_deep() {
    let mut mesh = mesh_with_displacement(&[4]);
    ensure_grids(&mut mesh, 1);
    mesh.displacement_grids_mut().unwrap()[0].data_mut()[0] = Vec3::splat(1.0);

    let mut context = context_for(&mesh, 1, 1);
    context.store_original_grids(&mesh);

    // Mutating the live grid must not show through the snapshot.
    mesh.displacement_grids_mut().unwrap()[0].data_mut()[0] = Vec3::splat(9.0);

    let orig = context.orig_grid_element_for_grid_coord(&GridCoord {
        grid_index: 0,
        u: 0.0,
        v: 0.0,
    });
    assert_eq!(orig.displacement, Vec3::splat(1.0));
}

#[test]
fn original_grids_read_at_their_own_level() {
    let mut mesh = mesh_with_displacement(&[3]);
    ensure_grids(&mut mesh, 1);
    for grid in mesh.displacement_grids_mut().unwrap() {
        for (j, value) in grid.data_mut().iter_mut().enumerate() {
            *value = Vec3::splat(j as f32);
        }
    }

    let mut context = context_for(&mesh, 1, 2);
    context.store_original_grids(&mesh);

    // The live grids grow to the top level; the snapshot keeps level 1 and
    // must be addressed with its own 3×3 cell layout.
    ensure_grids(&mut mesh, 2);

    let orig_at = |u, v| {
        context
            .orig_grid_element_for_grid_coord(&GridCoord {
                grid_index: 0,
                u,
                v,
            })
            .displacement
    };
    assert_eq!(orig_at(1.0, 1.0), Vec3::splat(8.0));
    assert_eq!(orig_at(0.5, 0.0), Vec3::splat(1.0));
    assert_eq!(orig_at(0.0, 1.0), Vec3::splat(6.0));
}

#[test]
fn missing_snapshot_reads_as_zero() {
    let mesh = mesh_with_displacement(&[5]);
    let context = context_for(&mesh, 1, 1);

    let element = context.orig_grid_element_for_grid_coord(&GridCoord {
        grid_index: 2,
        u: 0.5,
        v: 0.5,
    });
    assert_eq!(element.displacement, Vec3::ZERO);
    assert_eq!(element.mask, 0.0);
}

#[test]
fn unallocated_original_grid_reads_as_zero() {
    // Snapshot taken while the grids were never allocated: the copies stay
    // unallocated and read back as zero.
    let mesh = mesh_with_displacement(&[4]);
    let mut context = context_for(&mesh, 1, 1);
    context.store_original_grids(&mesh);

    let element = context.orig_grid_element_for_grid_coord(&GridCoord {
        grid_index: 3,
        u: 1.0,
        v: 1.0,
    });
    assert_eq!(element.displacement, Vec3::ZERO);
    assert_eq!(element.mask, 0.0);
}

#[test]
fn free_original_grids_is_idempotent() {
    let mut mesh = mesh_with_displacement(&[4]);
    ensure_grids(&mut mesh, 1);
    mesh.displacement_grids_mut().unwrap()[0].data_mut()[0] = Vec3::splat(5.0);

    let mut context = context_for(&mesh, 1, 1);
    context.free_original_grids();

    context.store_original_grids(&mesh);
    context.free_original_grids();
    context.free_original_grids();

    let element = context.orig_grid_element_for_grid_coord(&GridCoord {
        grid_index: 0,
        u: 0.0,
        v: 0.0,
    });
    assert_eq!(element.displacement, Vec3::ZERO);
}
